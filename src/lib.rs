pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{DirectoryInventory, HttpCurveSource, LocalStorage};
pub use core::{etl::EtlEngine, pipeline::CurvePipeline};
pub use domain::model::{CurveRecord, Design, DesignAggregate, FetchFailurePolicy, RunSummary};
pub use utils::error::{EtlError, Result};
