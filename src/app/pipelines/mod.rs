pub mod legacy_pipeline;
pub mod workbook_pipeline;

pub use legacy_pipeline::LegacyJsonPipeline;
pub use workbook_pipeline::WorkbookPipeline;

use crate::core::{ConfigProvider, LoadSummary, Storage, TransformResult};
use crate::domain::services::render::render_json;
use crate::utils::error::Result;

/// Renders the finished record list and writes it in one go.
pub(crate) fn write_records<S: Storage, C: ConfigProvider>(
    storage: &S,
    config: &C,
    result: &TransformResult,
) -> Result<LoadSummary> {
    let json = render_json(&result.records, config.profile())?;

    tracing::debug!(
        "Writing {} bytes ({} profile) to {}",
        json.len(),
        config.profile(),
        config.output_path()
    );
    storage.write_file(config.output_path(), json.as_bytes())?;

    Ok(LoadSummary {
        output_path: storage.location(config.output_path()),
        record_count: result.records.len(),
        written: true,
    })
}
