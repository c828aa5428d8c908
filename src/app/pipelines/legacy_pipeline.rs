use crate::app::pipelines::write_records;
use crate::core::{ConfigProvider, LoadSummary, Pipeline, Storage, TransformResult};
use crate::domain::model::LegacyEntry;
use crate::domain::services::records::records_from_legacy;
use crate::utils::error::Result;

/// Reads the hand-maintained `[{"name": .., "rating"|"rank": ..}]` file.
pub struct LegacyJsonPipeline<'a, S: Storage, C: ConfigProvider> {
    storage: &'a S,
    config: &'a C,
}

impl<'a, S: Storage, C: ConfigProvider> LegacyJsonPipeline<'a, S, C> {
    pub fn new(storage: &'a S, config: &'a C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for LegacyJsonPipeline<'_, S, C> {
    type Raw = Vec<LegacyEntry>;

    fn target(&self) -> String {
        self.storage.location(self.config.output_path())
    }

    fn extract(&self) -> Result<Vec<LegacyEntry>> {
        let bytes = self.storage.read_file(self.config.legacy_json_path())?;
        let entries: Vec<LegacyEntry> = serde_json::from_slice(&bytes)?;
        tracing::info!("Extracted {} legacy entries", entries.len());
        Ok(entries)
    }

    fn transform(&self, data: Vec<LegacyEntry>) -> Result<TransformResult> {
        Ok(records_from_legacy(&data))
    }

    fn load(&self, result: TransformResult) -> Result<LoadSummary> {
        write_records(self.storage, self.config, &result)
    }
}
