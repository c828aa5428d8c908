use crate::config::{
    validate_provider, DEFAULT_LEGACY_JSON_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_ROOT,
    DEFAULT_XLSX_PATH,
};
use crate::core::ConfigProvider;
use crate::domain::model::OutputProfile;
use crate::domain::services::columns::{ColumnAliases, Field};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub paths: Option<PathsConfig>,
    pub output: Option<OutputConfig>,
    pub columns: Option<ColumnsConfig>,
    #[serde(skip)]
    aliases: ColumnAliases,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub root: Option<String>,
    pub xlsx: Option<String>,
    pub legacy_json: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub profile: Option<OutputProfile>,
}

/// Header alias overrides. A field left out keeps its built-in aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnsConfig {
    pub title: Option<Vec<String>>,
    pub rating: Option<Vec<String>>,
    pub issn: Option<Vec<String>>,
    pub issn_online: Option<Vec<String>>,
    pub publisher: Option<Vec<String>>,
    pub for_code: Option<Vec<String>>,
    pub year: Option<Vec<String>>,
}

impl ColumnsConfig {
    fn overrides(&self) -> [(Field, Option<&Vec<String>>); 7] {
        [
            (Field::Title, self.title.as_ref()),
            (Field::Rating, self.rating.as_ref()),
            (Field::Issn, self.issn.as_ref()),
            (Field::IssnOnline, self.issn_online.as_ref()),
            (Field::Publisher, self.publisher.as_ref()),
            (Field::ForCode, self.for_code.as_ref()),
            (Field::Year, self.year.as_ref()),
        ]
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.aliases = config.build_aliases();
        Ok(config)
    }

    /// 替換環境變數 (例如 ${ABDC_ROOT})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    fn build_aliases(&self) -> ColumnAliases {
        let mut aliases = ColumnAliases::abdc();
        if let Some(columns) = &self.columns {
            for (field, list) in columns.overrides() {
                if let Some(list) = list {
                    tracing::debug!("Overriding header aliases for {}: {:?}", field, list);
                    aliases.set(field, list);
                }
            }
        }
        aliases
    }

    pub fn root(&self) -> &str {
        self.paths
            .as_ref()
            .and_then(|p| p.root.as_deref())
            .unwrap_or(DEFAULT_ROOT)
    }
}

impl ConfigProvider for TomlConfig {
    fn xlsx_path(&self) -> &str {
        self.paths
            .as_ref()
            .and_then(|p| p.xlsx.as_deref())
            .unwrap_or(DEFAULT_XLSX_PATH)
    }

    fn legacy_json_path(&self) -> &str {
        self.paths
            .as_ref()
            .and_then(|p| p.legacy_json.as_deref())
            .unwrap_or(DEFAULT_LEGACY_JSON_PATH)
    }

    fn output_path(&self) -> &str {
        self.paths
            .as_ref()
            .and_then(|p| p.output.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn profile(&self) -> OutputProfile {
        self.output
            .as_ref()
            .and_then(|o| o.profile)
            .unwrap_or_default()
    }

    fn column_aliases(&self) -> &ColumnAliases {
        &self.aliases
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
