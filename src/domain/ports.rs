use crate::domain::model::{CurveRecord, EnrichmentOutcome, FetchFailurePolicy, RunSummary, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 依花號取得雕刻曲線
#[async_trait]
pub trait CurveSource: Send + Sync {
    async fn fetch_curves(&self, design_number: &str) -> Result<Vec<CurveRecord>>;
}

/// 列出曲線定義檔（含副檔名）
#[async_trait]
pub trait CurveInventory: Send + Sync {
    async fn list_curve_file_names(&self) -> Result<Vec<String>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn design_query_param(&self) -> &str;
    fn manifest_path(&self) -> &str;
    fn design_info_output(&self) -> &str;
    fn curve_names_output(&self) -> &str;
    fn inventory_dir(&self) -> &str;
    /// 空字串表示不過濾
    fn inventory_extension(&self) -> &str;
    fn curve_columns(&self) -> usize;
    fn concurrent_requests(&self) -> usize;
    fn request_timeout(&self) -> Duration;
    fn fetch_failure_policy(&self) -> FetchFailurePolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<EnrichmentOutcome>;
    async fn transform(&self, data: EnrichmentOutcome) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<RunSummary>;
}
