use crate::adapters::http::{DEFAULT_API_ENDPOINT, DEFAULT_DESIGN_QUERY_PARAM};
use crate::adapters::inventory::DEFAULT_CURVE_EXTENSION;
use crate::core::report::DEFAULT_CURVE_COLUMNS;
use crate::core::ConfigProvider;
use crate::domain::model::FetchFailurePolicy;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineInfo,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
    pub inventory: InventoryConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub design_param: String,
    pub timeout_seconds: Option<u64>,
    pub concurrent_requests: Option<usize>,
    pub on_failure: Option<FetchFailurePolicy>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            design_param: DEFAULT_DESIGN_QUERY_PARAM.to_string(),
            timeout_seconds: None,
            concurrent_requests: None,
            on_failure: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub manifest: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            manifest: super::DEFAULT_MANIFEST.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub curve_columns: Option<usize>,
    pub design_info_output: String,
    pub curve_names_output: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            curve_columns: None,
            design_info_output: super::DEFAULT_DESIGN_INFO_OUTPUT.to_string(),
            curve_names_output: super::DEFAULT_CURVE_NAMES_OUTPUT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub directory: String,
    pub extension: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CURVE_DIR})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn design_query_param(&self) -> &str {
        &self.source.design_param
    }

    fn manifest_path(&self) -> &str {
        &self.input.manifest
    }

    fn design_info_output(&self) -> &str {
        &self.report.design_info_output
    }

    fn curve_names_output(&self) -> &str {
        &self.report.curve_names_output
    }

    fn inventory_dir(&self) -> &str {
        &self.inventory.directory
    }

    fn inventory_extension(&self) -> &str {
        self.inventory
            .extension
            .as_deref()
            .unwrap_or(DEFAULT_CURVE_EXTENSION)
    }

    fn curve_columns(&self) -> usize {
        self.report.curve_columns.unwrap_or(DEFAULT_CURVE_COLUMNS)
    }

    fn concurrent_requests(&self) -> usize {
        self.source
            .concurrent_requests
            .unwrap_or(super::DEFAULT_CONCURRENT_REQUESTS)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.source
                .timeout_seconds
                .unwrap_or(super::DEFAULT_REQUEST_TIMEOUT_SECONDS),
        )
    }

    fn fetch_failure_policy(&self) -> FetchFailurePolicy {
        self.source.on_failure.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        super::validate_provider(self)
    }
}
