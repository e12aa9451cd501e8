pub mod enrich;
pub mod etl;
pub mod ingest;
pub mod pipeline;
pub mod reconcile;
pub mod report;

pub use crate::domain::model::{
    CurveRecord, CurveVerdict, Design, DesignAggregate, EnrichmentOutcome, RunSummary,
    TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, CurveInventory, CurveSource, Pipeline, Storage};
pub use crate::utils::error::Result;
