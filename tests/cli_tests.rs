use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn abdc_json(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_abdc-json"))
        .arg("--root")
        .arg(root)
        .args(extra)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn abdc_json_default_logging(root: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_abdc-json"))
        .arg("--root")
        .arg(root)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_legacy(root: &Path, body: &str) {
    std::fs::create_dir_all(root.join("data")).unwrap();
    std::fs::write(root.join("data/abdc.json"), body).unwrap();
}

#[test]
fn test_fallback_warns_and_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    write_legacy(temp_dir.path(), r#"[{"name": "Beta", "rank": "B"}]"#);

    let output = abdc_json(temp_dir.path(), &[]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("with 1 journals"));
    assert!(stderr.starts_with("warning:"));
    assert!(temp_dir.path().join("public/data/abdc.json").exists());
}

#[test]
fn test_no_source_exits_one() {
    let temp_dir = TempDir::new().unwrap();

    let output = abdc_json(temp_dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error:"));
    assert!(!temp_dir.path().join("public").exists());
}

#[test]
fn test_malformed_legacy_exits_two() {
    let temp_dir = TempDir::new().unwrap();
    write_legacy(temp_dir.path(), "{not json");

    let output = abdc_json(temp_dir.path(), &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!temp_dir.path().join("public/data/abdc.json").exists());
}

#[test]
fn test_dry_run_and_simple_profile() {
    let temp_dir = TempDir::new().unwrap();
    write_legacy(temp_dir.path(), r#"[{"name": "Beta", "rating": "B"}]"#);

    let output = abdc_json(temp_dir.path(), &["--dry-run"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(!temp_dir.path().join("public/data/abdc.json").exists());

    let output = abdc_json(temp_dir.path(), &["--profile", "simple"]);
    assert_eq!(output.status.code(), Some(0));
    let text = std::fs::read_to_string(temp_dir.path().join("public/data/abdc.json")).unwrap();
    assert_eq!(text, "[\n  {\n    \"name\": \"Beta\",\n    \"rating\": \"B\"\n  }\n]\n");
}

#[test]
fn test_config_file() {
    let temp_dir = TempDir::new().unwrap();
    write_legacy(temp_dir.path(), r#"[{"name": "Beta", "rank": "B"}]"#);
    let config_path = temp_dir.path().join("abdc.toml");
    std::fs::write(&config_path, "[paths]\noutput = \"site/abdc.json\"\n").unwrap();

    let output = abdc_json(temp_dir.path(), &["--config", config_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    assert!(temp_dir.path().join("site/abdc.json").exists());
}

#[test]
fn test_invalid_output_extension_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write_legacy(temp_dir.path(), r#"[{"name": "Beta"}]"#);

    let output = abdc_json(temp_dir.path(), &["--output", "abdc.csv"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("abdc.csv").exists());
}

#[test]
fn test_fallback_stderr_is_one_warning_line() {
    let temp_dir = TempDir::new().unwrap();
    write_legacy(temp_dir.path(), r#"[{"name": "Beta", "rank": "B"}]"#);

    let output = abdc_json_default_logging(temp_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr was: {}", stderr);
    assert!(lines[0].starts_with("warning: "));
    assert!(lines[0].contains("abdc.xlsx not found; generated from fallback"));
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 1);
}

#[test]
fn test_no_source_stderr_is_one_error_line() {
    let temp_dir = TempDir::new().unwrap();

    let output = abdc_json_default_logging(temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(
        stderr,
        "error: neither data/abdc.xlsx nor data/abdc.json exists\n"
    );
}
