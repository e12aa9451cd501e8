use crate::core::enrich::Enricher;
use crate::core::ingest::parse_manifest;
use crate::core::reconcile::{distinct_curve_names, render_verdicts, CurveInventoryReconciler};
use crate::core::report::ReportBuilder;
use crate::core::{
    ConfigProvider, CurveInventory, CurveSource, EnrichmentOutcome, Pipeline, RunSummary, Storage,
    TransformResult,
};
use crate::domain::model::Verdict;
use crate::utils::error::Result;

/// 花號曲線管道
///
/// - extract：讀清單、逐一向曲線服務補齊曲線
/// - transform：產生花號資訊寬表與曲線名稱比對結果
/// - load：寫出兩份報表
pub struct CurvePipeline<S, F, I, C>
where
    S: Storage,
    F: CurveSource,
    I: CurveInventory,
    C: ConfigProvider,
{
    storage: S,
    source: F,
    inventory: I,
    config: C,
}

impl<S, F, I, C> CurvePipeline<S, F, I, C>
where
    S: Storage,
    F: CurveSource,
    I: CurveInventory,
    C: ConfigProvider,
{
    pub fn new(storage: S, source: F, inventory: I, config: C) -> Self {
        Self {
            storage,
            source,
            inventory,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S, F, I, C> Pipeline for CurvePipeline<S, F, I, C>
where
    S: Storage,
    F: CurveSource,
    I: CurveInventory,
    C: ConfigProvider,
{
    async fn extract(&self) -> Result<EnrichmentOutcome> {
        let manifest_path = self.config.manifest_path();
        tracing::info!("📋 Reading design manifest: {}", manifest_path);

        let manifest = self.storage.read_file(manifest_path).await?;
        let designs = parse_manifest(&manifest)?;
        tracing::info!("📋 {} designs in manifest", designs.len());

        tracing::info!(
            "🚀 Fetching engraving curves from {} ({} concurrent requests)",
            self.config.api_endpoint(),
            self.config.concurrent_requests()
        );
        Enricher::new(&self.source)
            .with_concurrency(self.config.concurrent_requests())
            .with_failure_policy(self.config.fetch_failure_policy())
            .enrich(designs)
            .await
    }

    async fn transform(&self, data: EnrichmentOutcome) -> Result<TransformResult> {
        let builder = ReportBuilder::new(self.config.curve_columns());
        let design_info_csv = builder.build(&data.designs)?;
        tracing::info!(
            "🔧 Built design info table: {} rows x {} curve columns",
            data.designs.len(),
            builder.columns()
        );

        let curve_names = distinct_curve_names(&data.designs);
        let inventory = self.inventory.list_curve_file_names().await?;
        let verdicts = CurveInventoryReconciler::new(&inventory).reconcile(&curve_names);
        let curve_names_csv = render_verdicts(&verdicts);

        for missing in verdicts.iter().filter(|v| v.verdict == Verdict::Missing) {
            tracing::debug!("Curve {} has no definition file", missing.name);
        }

        Ok(TransformResult {
            design_info_csv,
            curve_names_csv,
            verdicts,
            designs_reported: data.designs.len(),
            failures: data.failures,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<RunSummary> {
        let design_info_path = self.config.design_info_output();
        let curve_names_path = self.config.curve_names_output();

        self.storage
            .write_file(design_info_path, result.design_info_csv.as_bytes())
            .await?;
        tracing::info!("💾 Design info written to {}", design_info_path);

        self.storage
            .write_file(curve_names_path, result.curve_names_csv.as_bytes())
            .await?;
        tracing::info!("💾 Curve names written to {}", curve_names_path);

        let curves_found = result
            .verdicts
            .iter()
            .filter(|v| v.verdict == Verdict::Found)
            .count();

        Ok(RunSummary {
            designs_read: result.designs_reported + result.failures.len(),
            designs_reported: result.designs_reported,
            distinct_curves: result.verdicts.len(),
            curves_found,
            curves_missing: result.verdicts.len() - curves_found,
            failures: result.failures,
            design_info_path: design_info_path.to_string(),
            curve_names_path: curve_names_path.to_string(),
        })
    }
}
