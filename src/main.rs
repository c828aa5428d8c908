use abdc_json::config::toml_config::TomlConfig;
use abdc_json::core::{ConfigProvider, Storage};
use abdc_json::utils::{logger, validation::Validate};
use abdc_json::{CliConfig, LocalStorage};
use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        let file = TomlConfig::from_file(&path)
            .with_context(|| format!("failed to load config file '{}'", path))?;
        config = config.with_file_config(file);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::debug!("❌ Configuration validation failed: {}", e);
        tracing::debug!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("error: {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    let storage = LocalStorage::new(config.root());

    match abdc_json::run(&storage, &config, config.dry_run) {
        Ok(report) => {
            if report.used_fallback {
                eprintln!(
                    "warning: {} not found; generated from fallback {}",
                    storage.location(config.xlsx_path()),
                    report.source_path
                );
            }
            if report.written {
                println!(
                    "generated {} with {} journals from {}",
                    report.output_path, report.record_count, report.source_path
                );
            } else {
                println!(
                    "dry run: {} journals from {} (not written to {})",
                    report.record_count, report.source_path, report.output_path
                );
            }
            Ok(())
        }
        Err(e) => {
            // 詳細錯誤只在 --verbose 時顯示，stderr 預設只有一行 error
            tracing::debug!(
                "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("error: {}", e.user_friendly_message());
            std::process::exit(e.severity().exit_code());
        }
    }
}
