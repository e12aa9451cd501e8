use crate::adapters::http::{DEFAULT_API_ENDPOINT, DEFAULT_DESIGN_QUERY_PARAM};
use crate::core::ConfigProvider;
use crate::domain::model::FetchFailurePolicy;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "curve-etl")]
#[command(about = "Enrich a design manifest with engraving curves and check curve files on disk")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_DESIGN_QUERY_PARAM)]
    pub design_query_param: String,

    /// Input CSV: order, design number, design name (first line is a header)
    #[arg(long, default_value = super::DEFAULT_MANIFEST)]
    pub manifest: String,

    #[arg(long, default_value = super::DEFAULT_DESIGN_INFO_OUTPUT)]
    pub design_info_output: String,

    #[arg(long, default_value = super::DEFAULT_CURVE_NAMES_OUTPUT)]
    pub curve_names_output: String,

    /// Directory containing the curve definition files
    #[arg(long, default_value = super::DEFAULT_INVENTORY_DIR)]
    pub inventory_dir: String,

    /// Only files with this extension count as curve files; empty means all files
    #[arg(long, default_value = crate::adapters::inventory::DEFAULT_CURVE_EXTENSION)]
    pub inventory_extension: String,

    #[arg(long, default_value_t = crate::core::report::DEFAULT_CURVE_COLUMNS)]
    pub curve_columns: usize,

    #[arg(long, default_value_t = super::DEFAULT_CONCURRENT_REQUESTS)]
    pub concurrent_requests: usize,

    #[arg(long, default_value_t = super::DEFAULT_REQUEST_TIMEOUT_SECONDS)]
    pub request_timeout_seconds: u64,

    /// What to do when the curve service fails for a design: abort | skip
    #[arg(long, default_value = "abort")]
    pub on_fetch_failure: FetchFailurePolicy,

    /// Base directory for relative input/output paths
    #[arg(long, default_value = ".")]
    pub workdir: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Log CPU and memory usage per stage")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn design_query_param(&self) -> &str {
        &self.design_query_param
    }

    fn manifest_path(&self) -> &str {
        &self.manifest
    }

    fn design_info_output(&self) -> &str {
        &self.design_info_output
    }

    fn curve_names_output(&self) -> &str {
        &self.curve_names_output
    }

    fn inventory_dir(&self) -> &str {
        &self.inventory_dir
    }

    fn inventory_extension(&self) -> &str {
        &self.inventory_extension
    }

    fn curve_columns(&self) -> usize {
        self.curve_columns
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    fn fetch_failure_policy(&self) -> FetchFailurePolicy {
        self.on_fetch_failure
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)?;
        crate::utils::validation::validate_path("workdir", &self.workdir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["curve-etl"]);

        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.design_query_param, "DESNO");
        assert_eq!(config.manifest, "EngravingCurves.csv");
        assert_eq!(config.curve_columns, 10);
        assert_eq!(config.on_fetch_failure, FetchFailurePolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::parse_from([
            "curve-etl",
            "--inventory-dir",
            "/mnt/inkjet/curves",
            "--on-fetch-failure",
            "skip",
            "--concurrent-requests",
            "8",
            "--inventory-extension",
            "",
        ]);

        assert_eq!(config.inventory_dir(), "/mnt/inkjet/curves");
        assert_eq!(config.fetch_failure_policy(), FetchFailurePolicy::Skip);
        assert_eq!(config.concurrent_requests(), 8);
        assert_eq!(config.inventory_extension(), "");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(CliConfig::try_parse_from(["curve-etl", "--on-fetch-failure", "retry"]).is_err());

        let config = CliConfig::parse_from(["curve-etl", "--curve-columns", "0"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from([
            "curve-etl",
            "--curve-names-output",
            "OutputDesignInfo.csv",
        ]);
        assert!(config.validate().is_err());
    }
}
