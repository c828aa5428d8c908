pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};

pub const DEFAULT_ROOT: &str = ".";
pub const DEFAULT_XLSX_PATH: &str = "data/abdc.xlsx";
pub const DEFAULT_LEGACY_JSON_PATH: &str = "data/abdc.json";
pub const DEFAULT_OUTPUT_PATH: &str = "public/data/abdc.json";

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_path("xlsx", config.xlsx_path())?;
    validate_path("legacy_json", config.legacy_json_path())?;
    validate_path("output", config.output_path())?;

    validate_file_extension("xlsx", config.xlsx_path(), &["xlsx", "xlsm"])?;
    validate_file_extension("legacy_json", config.legacy_json_path(), &["json"])?;
    validate_file_extension("output", config.output_path(), &["json"])?;

    config.column_aliases().validate()
}

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::TomlConfig;
    use super::{
        validate_provider, DEFAULT_LEGACY_JSON_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_ROOT,
        DEFAULT_XLSX_PATH,
    };
    use crate::core::ConfigProvider;
    use crate::domain::model::OutputProfile;
    use crate::domain::services::columns::ColumnAliases;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::Parser;

    const EXIT_STATUS_HELP: &str = "\
Exit status:
  0  output generated (also when the legacy JSON fallback was used)
  1  no source file, unreadable workbook structure or invalid configuration
  2  bad data: malformed legacy JSON or a cell pointing outside the workbook
  3  I/O, zip or XML failure";

    #[derive(Debug, Clone, Parser)]
    #[command(name = "abdc-json")]
    #[command(about = "Generate the ABDC journal list JSON from the published spreadsheet")]
    #[command(after_help = EXIT_STATUS_HELP)]
    pub struct CliConfig {
        /// Directory the other paths are relative to [default: .]
        #[arg(long)]
        pub root: Option<String>,

        /// ABDC workbook (.xlsx) [default: data/abdc.xlsx]
        #[arg(long)]
        pub xlsx: Option<String>,

        /// Legacy JSON used when the workbook is missing [default: data/abdc.json]
        #[arg(long)]
        pub legacy_json: Option<String>,

        /// Output JSON file [default: public/data/abdc.json]
        #[arg(long)]
        pub output: Option<String>,

        /// Output schema [default: full]
        #[arg(long, value_enum)]
        pub profile: Option<OutputProfile>,

        /// TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Parse and report without writing the output file
        #[arg(long)]
        pub dry_run: bool,

        /// Enable verbose output
        #[arg(short, long)]
        pub verbose: bool,

        /// Emit log lines as JSON
        #[arg(long)]
        pub log_json: bool,

        #[arg(skip)]
        pub columns: ColumnAliases,
    }

    impl Default for CliConfig {
        fn default() -> Self {
            Self {
                root: None,
                xlsx: None,
                legacy_json: None,
                output: None,
                profile: None,
                config: None,
                dry_run: false,
                verbose: false,
                log_json: false,
                columns: ColumnAliases::default(),
            }
        }
    }

    impl CliConfig {
        pub fn root(&self) -> &str {
            self.root.as_deref().unwrap_or(DEFAULT_ROOT)
        }

        /// Fills everything not given on the command line from the file.
        pub fn with_file_config(mut self, file: TomlConfig) -> Self {
            let paths = file.paths.clone().unwrap_or_default();
            self.root = self.root.or(paths.root);
            self.xlsx = self.xlsx.or(paths.xlsx);
            self.legacy_json = self.legacy_json.or(paths.legacy_json);
            self.output = self.output.or(paths.output);
            self.profile = self.profile.or(Some(file.profile()));
            self.columns = file.column_aliases().clone();
            self
        }
    }

    impl ConfigProvider for CliConfig {
        fn xlsx_path(&self) -> &str {
            self.xlsx.as_deref().unwrap_or(DEFAULT_XLSX_PATH)
        }

        fn legacy_json_path(&self) -> &str {
            self.legacy_json.as_deref().unwrap_or(DEFAULT_LEGACY_JSON_PATH)
        }

        fn output_path(&self) -> &str {
            self.output.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
        }

        fn profile(&self) -> OutputProfile {
            self.profile.unwrap_or_default()
        }

        fn column_aliases(&self) -> &ColumnAliases {
            &self.columns
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("root", self.root())?;
            validate_provider(self)
        }
    }

}
