use crate::adapters::xlsx::read_first_sheet;
use crate::app::pipelines::write_records;
use crate::core::{ConfigProvider, LoadSummary, Pipeline, Storage, TransformResult};
use crate::domain::model::SheetRow;
use crate::domain::services::records::records_from_rows;
use crate::utils::error::Result;

/// Reads the ABDC workbook.
pub struct WorkbookPipeline<'a, S: Storage, C: ConfigProvider> {
    storage: &'a S,
    config: &'a C,
}

impl<'a, S: Storage, C: ConfigProvider> WorkbookPipeline<'a, S, C> {
    pub fn new(storage: &'a S, config: &'a C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for WorkbookPipeline<'_, S, C> {
    type Raw = Vec<SheetRow>;

    fn target(&self) -> String {
        self.storage.location(self.config.output_path())
    }

    fn extract(&self) -> Result<Vec<SheetRow>> {
        let bytes = self.storage.read_file(self.config.xlsx_path())?;
        tracing::debug!(
            "Read workbook {} ({} bytes)",
            self.config.xlsx_path(),
            bytes.len()
        );

        let rows = read_first_sheet(bytes)?;
        tracing::info!("Extracted {} worksheet rows", rows.len());
        Ok(rows)
    }

    fn transform(&self, data: Vec<SheetRow>) -> Result<TransformResult> {
        Ok(records_from_rows(&data, self.config.column_aliases()))
    }

    fn load(&self, result: TransformResult) -> Result<LoadSummary> {
        write_records(self.storage, self.config, &result)
    }
}
