use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static FLOAT_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.0$").unwrap());

/// Collapses every whitespace run (newlines and tabs included) to one space and trims.
pub fn clean(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value, " ").trim().to_string()
}

pub fn clean_opt(value: Option<&str>) -> String {
    value.map(clean).unwrap_or_default()
}

/// `"1990.0"` becomes `"1990"`. Anything else is returned unchanged.
pub fn normalize_year(value: &str) -> String {
    match FLOAT_YEAR.captures(value) {
        Some(caps) => caps[1].to_string(),
        None => value.to_string(),
    }
}

/// Text form of a legacy JSON scalar. `null` and missing values are empty.
pub fn json_text(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => clean(s),
        Some(other) => clean(&other.to_string()),
    }
}
