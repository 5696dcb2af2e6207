use crate::core::{Pipeline, RunReport};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 依序執行 extract → transform → load，回傳寫出的檔案與診斷
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting berry extraction...");

        // Extract
        let extraction = self.pipeline.extract().await?;
        tracing::info!("Extracted {} archive entries", extraction.entries.len());

        // Transform
        let transformed = self.pipeline.transform(extraction).await?;
        tracing::info!(
            "Transformed {} berries and {} mutations",
            transformed.berries.len(),
            transformed.mutations.len()
        );

        // Load
        let report = self.pipeline.load(transformed).await?;
        tracing::info!(
            "Extraction complete: {} files written, {} diagnostics",
            report.outputs.len(),
            report.diagnostics.len()
        );

        Ok(report)
    }
}
