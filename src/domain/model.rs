use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::EtlError;

/// 曲線服務回傳的單一滾筒雕刻曲線
///
/// 只有 `curve` 與 `fileName` 參與報表邏輯，其餘欄位（Layer、電壓、備註、日期…）
/// 原樣保留在 `attributes`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    #[serde(rename = "curve", alias = "Curve")]
    pub curve_code: Option<String>,

    #[serde(rename = "fileName", alias = "FileName", alias = "filename")]
    pub file_name: Option<String>,

    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl CurveRecord {
    pub fn new(curve_code: Option<&str>, file_name: Option<&str>) -> Self {
        Self {
            curve_code: curve_code.map(str::to_string),
            file_name: file_name.map(str::to_string),
            attributes: serde_json::Map::new(),
        }
    }
}

/// 清單中的一列：順序、花號、花名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    pub order: String,
    pub design_number: String,
    pub design_name: String,
}

impl Design {
    pub fn new(
        order: impl Into<String>,
        design_number: impl Into<String>,
        design_name: impl Into<String>,
    ) -> Self {
        Self {
            order: order.into(),
            design_number: design_number.into(),
            design_name: design_name.into(),
        }
    }

    /// 以抓回的曲線建立新的聚合值，不就地修改
    pub fn with_curves(self, curves: Vec<CurveRecord>) -> DesignAggregate {
        DesignAggregate {
            design: self,
            curves,
        }
    }
}

/// 花號加上其曲線；`curves` 的順序即報表欄位順序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignAggregate {
    pub design: Design,
    pub curves: Vec<CurveRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchFailurePolicy {
    #[default]
    Abort,
    Skip,
}

impl FromStr for FetchFailurePolicy {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FetchFailurePolicy::Abort),
            "skip" => Ok(FetchFailurePolicy::Skip),
            other => Err(EtlError::InvalidConfigValueError {
                field: "on_fetch_failure".to_string(),
                value: other.to_string(),
                reason: "Expected 'abort' or 'skip'".to_string(),
            }),
        }
    }
}

impl fmt::Display for FetchFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailurePolicy::Abort => write!(f, "abort"),
            FetchFailurePolicy::Skip => write!(f, "skip"),
        }
    }
}

/// 在 skip 策略下被略過的花號
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub design: Design,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct EnrichmentOutcome {
    pub designs: Vec<DesignAggregate>,
    pub failures: Vec<FetchFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Found,
    Missing,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Found => write!(f, "FOUND"),
            Verdict::Missing => write!(f, "MISSING"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurveVerdict {
    pub name: String,
    pub verdict: Verdict,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub design_info_csv: String,
    pub curve_names_csv: String,
    pub verdicts: Vec<CurveVerdict>,
    pub designs_reported: usize,
    pub failures: Vec<FetchFailure>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub designs_read: usize,
    pub designs_reported: usize,
    pub failures: Vec<FetchFailure>,
    pub distinct_curves: usize,
    pub curves_found: usize,
    pub curves_missing: usize,
    pub design_info_path: String,
    pub curve_names_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_record_keeps_unknown_fields() {
        let json = serde_json::json!({
            "desno": "1001",
            "Layer": 2,
            "cylno": "A12",
            "curve": "PMS186",
            "hiVoltage": 7.5,
            "fileName": "pms186.txt",
            "EntryDate": "2019-04-02"
        });

        let record: CurveRecord = serde_json::from_value(json).unwrap();

        assert_eq!(record.curve_code.as_deref(), Some("PMS186"));
        assert_eq!(record.file_name.as_deref(), Some("pms186.txt"));
        assert_eq!(record.attributes.get("cylno").unwrap(), "A12");
        assert_eq!(record.attributes.get("Layer").unwrap().as_i64(), Some(2));
        assert!(!record.attributes.contains_key("curve"));
    }

    #[test]
    fn test_curve_record_null_and_absent_fields() {
        let record: CurveRecord =
            serde_json::from_value(serde_json::json!({"curve": null})).unwrap();
        assert_eq!(record.curve_code, None);
        assert_eq!(record.file_name, None);
    }

    #[test]
    fn test_fetch_failure_policy_parsing() {
        assert_eq!("abort".parse::<FetchFailurePolicy>().unwrap(), FetchFailurePolicy::Abort);
        assert_eq!(" SKIP ".parse::<FetchFailurePolicy>().unwrap(), FetchFailurePolicy::Skip);
        assert!("retry".parse::<FetchFailurePolicy>().is_err());
        assert_eq!(FetchFailurePolicy::default().to_string(), "abort");
    }

    #[test]
    fn test_with_curves_builds_aggregate() {
        let aggregate = Design::new("1", "1001", "DesignA")
            .with_curves(vec![CurveRecord::new(Some("C"), None)]);
        assert_eq!(aggregate.design.design_number, "1001");
        assert_eq!(aggregate.curves.len(), 1);
    }
}
