#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_extension, validate_non_empty_string, validate_path, validate_range, validate_url,
};

pub const DEFAULT_MANIFEST: &str = "EngravingCurves.csv";
pub const DEFAULT_DESIGN_INFO_OUTPUT: &str = "OutputDesignInfo.csv";
pub const DEFAULT_CURVE_NAMES_OUTPUT: &str = "OutputCurveNames.csv";
pub const DEFAULT_INVENTORY_DIR: &str = "curves";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// CLI 與 TOML 共用的設定檢查
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("api_endpoint", config.api_endpoint())?;
    validate_non_empty_string("design_query_param", config.design_query_param())?;

    validate_path("manifest", config.manifest_path())?;
    validate_path("design_info_output", config.design_info_output())?;
    validate_path("curve_names_output", config.curve_names_output())?;
    validate_path("inventory_dir", config.inventory_dir())?;
    validate_extension("inventory_extension", config.inventory_extension())?;

    validate_range("curve_columns", config.curve_columns(), 1, 99)?;
    validate_range("concurrent_requests", config.concurrent_requests(), 1, 100)?;
    validate_range(
        "request_timeout_seconds",
        config.request_timeout().as_secs(),
        1,
        3600,
    )?;

    if config.design_info_output() == config.curve_names_output() {
        return Err(crate::utils::error::EtlError::ConfigValidationError {
            field: "curve_names_output".to_string(),
            message: "Both reports would be written to the same file".to_string(),
        });
    }

    tracing::debug!("✅ Configuration validation passed");
    Ok(())
}
