use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Manifest line {line} is malformed: {message}")]
    ManifestParseError { line: u64, message: String },

    #[error("Failed to fetch curves for design '{design_number}': {source}")]
    FetchError {
        design_number: String,
        #[source]
        source: Box<EtlError>,
    },

    #[error("Curve service returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("Curve inventory unavailable at '{path}': {message}")]
    InventoryError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorCategory::Network,
            EtlError::FetchError { source, .. } => source.category(),
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::ManifestParseError { .. }
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::IoError(_) | EtlError::InventoryError { .. } => ErrorCategory::Storage,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常重跑即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ApiError(e) if e.is_timeout() => {
                "The curve service timed out; raise --request-timeout-seconds or retry later".to_string()
            }
            EtlError::ApiError(_) => {
                "Check network connectivity and that the curve service endpoint is reachable".to_string()
            }
            EtlError::HttpStatusError { status, .. } if *status >= 500 => {
                "The curve service is failing; retry later".to_string()
            }
            EtlError::HttpStatusError { .. } => {
                "Verify --api-endpoint and --design-query-param".to_string()
            }
            EtlError::FetchError { source, .. } => format!(
                "{} (or run with --on-fetch-failure skip to report the remaining designs)",
                source.recovery_suggestion()
            ),
            EtlError::SerializationError(_) => {
                "The curve service returned an unexpected payload; expected a JSON array of curve records".to_string()
            }
            EtlError::ManifestParseError { line, .. } => format!(
                "Fix manifest line {} so it has at least order, design number and design name",
                line
            ),
            EtlError::CsvError(_) => "Check that the manifest is a valid UTF-8 CSV file".to_string(),
            EtlError::InventoryError { .. } => {
                "Check that --inventory-dir exists and is readable".to_string()
            }
            EtlError::IoError(_) => {
                "Check file paths and write permissions for the output location".to_string()
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Review the configuration values and run with --help for defaults".to_string()
            }
            EtlError::ProcessingError { .. } => "Re-run with --verbose to inspect the failing stage".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not retrieve engraving curves: {}", self),
            ErrorCategory::Data => format!("Input data could not be processed: {}", self),
            ErrorCategory::Storage => format!("File access failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_inherits_category_of_cause() {
        let err = EtlError::FetchError {
            design_number: "1001".to_string(),
            source: Box::new(EtlError::HttpStatusError {
                status: 503,
                url: "http://localhost/curves".to_string(),
            }),
        };

        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("1001"));
        assert!(err.recovery_suggestion().contains("--on-fetch-failure skip"));
    }

    #[test]
    fn test_manifest_error_is_data_error() {
        let err = EtlError::ManifestParseError {
            line: 3,
            message: "expected at least 3 fields, found 2".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("line 3"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = EtlError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("File access failed"));
    }
}
