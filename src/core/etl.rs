use crate::core::{LoadSummary, Pipeline};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    /// In dry-run mode the load step is skipped and nothing is written.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(&self) -> Result<LoadSummary> {
        tracing::info!("Starting ETL process...");

        // Extract
        tracing::debug!("Extracting data...");
        let raw_data = self.pipeline.extract()?;

        // Transform
        tracing::debug!("Transforming data...");
        let transformed = self.pipeline.transform(raw_data)?;
        tracing::info!(
            "Transformed {} records ({} skipped without title)",
            transformed.records.len(),
            transformed.skipped_rows
        );

        if self.dry_run {
            tracing::info!("🔍 Dry run: output not written");
            return Ok(LoadSummary {
                output_path: self.pipeline.target(),
                record_count: transformed.records.len(),
                written: false,
            });
        }

        // Load
        tracing::debug!("Loading data...");
        let summary = self.pipeline.load(transformed)?;
        tracing::info!("Output saved to: {}", summary.output_path);

        Ok(summary)
    }
}
