use crate::app::pipelines::{LegacyJsonPipeline, WorkbookPipeline};
use crate::core::etl::EtlEngine;
use crate::core::source::select_source;
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{RunReport, SourceKind};
use crate::utils::error::Result;

/// Picks the source, runs the matching pipeline and reports what happened.
pub fn run<S: Storage, C: ConfigProvider>(storage: &S, config: &C, dry_run: bool) -> Result<RunReport> {
    let source = select_source(storage, config)?;

    let (source_path, summary) = match source {
        SourceKind::Workbook => {
            let pipeline = WorkbookPipeline::new(storage, config);
            let summary = EtlEngine::new(pipeline).with_dry_run(dry_run).run()?;
            (config.xlsx_path(), summary)
        }
        SourceKind::LegacyJson => {
            // 提示由呼叫端輸出，這裡只留 debug 紀錄
            tracing::debug!(
                "{} not found; generating from fallback {}",
                config.xlsx_path(),
                config.legacy_json_path()
            );
            let pipeline = LegacyJsonPipeline::new(storage, config);
            let summary = EtlEngine::new(pipeline).with_dry_run(dry_run).run()?;
            (config.legacy_json_path(), summary)
        }
    };

    Ok(RunReport {
        source,
        source_path: storage.location(source_path),
        output_path: summary.output_path,
        record_count: summary.record_count,
        used_fallback: source == SourceKind::LegacyJson,
        written: summary.written,
    })
}
