use crate::domain::model::{CurveVerdict, DesignAggregate, Verdict};
use std::collections::{BTreeSet, HashSet};

pub fn normalize_curve_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// 檔名取第一個 `.` 之前的部分再正規化；沒有 `.` 時取整個檔名
pub fn normalize_file_stem(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    normalize_curve_name(stem)
}

/// 所有花號中不重複、已正規化的曲線名稱，依字典序排列
pub fn distinct_curve_names(designs: &[DesignAggregate]) -> BTreeSet<String> {
    designs
        .iter()
        .flat_map(|aggregate| aggregate.curves.iter())
        .filter_map(|curve| curve.curve_code.as_deref())
        .map(normalize_curve_name)
        .filter(|name| !name.is_empty())
        .collect()
}

/// 比對曲線名稱與磁碟上的曲線定義檔
pub struct CurveInventoryReconciler {
    stems: HashSet<String>,
}

impl CurveInventoryReconciler {
    pub fn new<I, S>(inventory: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stems: inventory
                .into_iter()
                .map(|file_name| normalize_file_stem(file_name.as_ref()))
                .collect(),
        }
    }

    pub fn verdict(&self, curve_name: &str) -> Verdict {
        if self.stems.contains(curve_name) {
            Verdict::Found
        } else {
            Verdict::Missing
        }
    }

    pub fn reconcile(&self, curve_names: &BTreeSet<String>) -> Vec<CurveVerdict> {
        curve_names
            .iter()
            .map(|name| CurveVerdict {
                name: name.clone(),
                verdict: self.verdict(name),
            })
            .collect()
    }
}

/// 每行 `<NAME>, FOUND` 或 `<NAME>, MISSING`
pub fn render_verdicts(verdicts: &[CurveVerdict]) -> String {
    verdicts
        .iter()
        .map(|v| format!("{}, {}\n", v.name, v.verdict))
        .collect()
}
