use crate::domain::model::{LoadSummary, OutputProfile, TransformResult};
use crate::domain::services::columns::ColumnAliases;
use crate::utils::error::Result;

/// File access relative to the configured root.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn exists(&self, path: &str) -> bool;
    /// Human-readable location of `path`, used in messages.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider {
    fn xlsx_path(&self) -> &str;
    fn legacy_json_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn profile(&self) -> OutputProfile;
    fn column_aliases(&self) -> &ColumnAliases;
}

pub trait Pipeline {
    type Raw;

    /// Where `load` writes, for reporting.
    fn target(&self) -> String;
    fn extract(&self) -> Result<Self::Raw>;
    fn transform(&self, data: Self::Raw) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<LoadSummary>;
}
