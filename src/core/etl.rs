use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    #[cfg(test)]
    pub(crate) fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting curve ETL process...");

        // Extract：清單 + 曲線服務
        let enriched = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} designs ({} fetch failures)",
            enriched.designs.len(),
            enriched.failures.len()
        );
        self.monitor.log_stage("Extract");

        // Transform：寬表 + 曲線比對
        let transformed = self.pipeline.transform(enriched).await?;
        tracing::info!(
            "Transformed {} designs, {} distinct curves",
            transformed.designs_reported,
            transformed.verdicts.len()
        );
        self.monitor.log_stage("Transform");

        // Load
        let summary = self.pipeline.load(transformed).await?;
        self.monitor.log_stage("Load");
        self.monitor.log_final();

        Ok(summary)
    }
}
