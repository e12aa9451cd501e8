use crate::domain::model::{CurveRecord, Design, EnrichmentOutcome, FetchFailure, FetchFailurePolicy};
use crate::domain::ports::CurveSource;
use crate::utils::error::{EtlError, Result};
use futures::stream::{self, StreamExt};

/// 對每個花號呼叫曲線服務並組成 [`DesignAggregate`](crate::domain::model::DesignAggregate)
///
/// 請求可並行送出，但結果依清單順序組裝；每個花號只會被指派一次曲線。
pub struct Enricher<'a, F: CurveSource + ?Sized> {
    source: &'a F,
    concurrency: usize,
    policy: FetchFailurePolicy,
}

impl<'a, F: CurveSource + ?Sized> Enricher<'a, F> {
    pub fn new(source: &'a F) -> Self {
        Self {
            source,
            concurrency: 1,
            policy: FetchFailurePolicy::Abort,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_failure_policy(mut self, policy: FetchFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn enrich(&self, designs: Vec<Design>) -> Result<EnrichmentOutcome> {
        let total = designs.len();
        let source = self.source;

        let mut fetches = stream::iter(designs.into_iter().enumerate().map(
            |(index, design)| async move {
                tracing::debug!(
                    "📡 Fetching curves {}/{} for design {}",
                    index + 1,
                    total,
                    design.design_number
                );
                let result = fetch_for_design(source, &design.design_number).await;
                (design, result)
            },
        ))
        .buffered(self.concurrency);

        let mut outcome = EnrichmentOutcome::default();
        while let Some((design, result)) = fetches.next().await {
            match result {
                Ok(curves) => {
                    tracing::debug!(
                        "Design {} has {} curve records",
                        design.design_number,
                        curves.len()
                    );
                    outcome.designs.push(design.with_curves(curves));
                }
                Err(e) => match self.policy {
                    FetchFailurePolicy::Abort => {
                        tracing::error!("❌ {}", e);
                        return Err(e);
                    }
                    FetchFailurePolicy::Skip => {
                        tracing::warn!("⚠️ Skipping design {}: {}", design.design_number, e);
                        outcome.failures.push(FetchFailure {
                            reason: e.to_string(),
                            design,
                        });
                    }
                },
            }
        }

        tracing::info!(
            "📊 Enriched {} designs ({} failed)",
            outcome.designs.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }
}

async fn fetch_for_design<F: CurveSource + ?Sized>(
    source: &F,
    design_number: &str,
) -> Result<Vec<CurveRecord>> {
    let wrap = |source: EtlError| EtlError::FetchError {
        design_number: design_number.to_string(),
        source: Box::new(source),
    };

    if design_number.trim().is_empty() {
        return Err(wrap(EtlError::ProcessingError {
            message: "design number is empty".to_string(),
        }));
    }

    source.fetch_curves(design_number).await.map_err(wrap)
}
