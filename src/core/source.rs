use crate::core::{ConfigProvider, Storage};
use crate::domain::model::SourceKind;
use crate::utils::error::{EtlError, Result};

/// Workbook when present, otherwise the legacy JSON file.
pub fn select_source<S: Storage, C: ConfigProvider>(storage: &S, config: &C) -> Result<SourceKind> {
    if storage.exists(config.xlsx_path()) {
        tracing::debug!("Using workbook {}", storage.location(config.xlsx_path()));
        return Ok(SourceKind::Workbook);
    }

    if storage.exists(config.legacy_json_path()) {
        return Ok(SourceKind::LegacyJson);
    }

    Err(EtlError::SourceNotFound {
        xlsx: config.xlsx_path().to_string(),
        legacy: config.legacy_json_path().to_string(),
    })
}
