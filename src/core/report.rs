use crate::domain::model::{CurveRecord, DesignAggregate};
use crate::utils::error::{EtlError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// 沒有任何曲線資料時每一欄填入的標記
pub const MISSING: &str = "Missing";
/// 曲線數少於欄數時的空白佔位（與 MISSING 區分）
pub const PLACEHOLDER: &str = " ";
pub const DEFAULT_CURVE_COLUMNS: usize = 10;

/// 四色製程曲線一律使用標準檔名
const PROCESS_CODES: [&str; 4] = ["C", "M", "Y", "K"];

/// 產生花號資訊寬表：`Order,Design No,Design,Curve01..,File01..`
pub struct ReportBuilder {
    columns: usize,
}

impl ReportBuilder {
    pub fn new(columns: usize) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn header(&self) -> Vec<String> {
        let mut header = vec![
            "Order".to_string(),
            "Design No".to_string(),
            "Design".to_string(),
        ];
        header.extend((1..=self.columns).map(|i| format!("Curve{:02}", i)));
        header.extend((1..=self.columns).map(|i| format!("File{:02}", i)));
        header
    }

    /// 單一花號的資料列，尾端多一個空欄位（輸出時形成結尾逗號）
    pub fn row(&self, aggregate: &DesignAggregate) -> Vec<String> {
        let design = &aggregate.design;
        let curves = &aggregate.curves;

        let mut row = Vec::with_capacity(3 + 2 * self.columns + 1);
        row.push(design.order.clone());
        row.push(design.design_number.clone());
        row.push(design.design_name.clone());
        row.extend((0..self.columns).map(|i| curve_cell(curves, i)));
        row.extend((0..self.columns).map(|i| file_cell(curves, i)));
        row.push(String::new());
        row
    }

    pub fn build(&self, designs: &[DesignAggregate]) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(self.header())?;
        for aggregate in designs {
            writer.write_record(self.row(aggregate))?;
        }

        let bytes = writer.into_inner().map_err(|e| EtlError::ProcessingError {
            message: format!("Failed to flush design info report: {}", e),
        })?;
        String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
            message: format!("Design info report is not valid UTF-8: {}", e),
        })
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CURVE_COLUMNS)
    }
}

fn curve_cell(curves: &[CurveRecord], index: usize) -> String {
    if curves.is_empty() {
        return MISSING.to_string();
    }

    match curves.get(index) {
        Some(curve) => curve.curve_code.clone().unwrap_or_default(),
        None => PLACEHOLDER.to_string(),
    }
}

fn file_cell(curves: &[CurveRecord], index: usize) -> String {
    if curves.is_empty() {
        return MISSING.to_string();
    }

    let Some(curve) = curves.get(index) else {
        return PLACEHOLDER.to_string();
    };

    match (curve.curve_code.as_deref(), curve.file_name.as_deref()) {
        // 有曲線代碼卻沒有檔名
        (Some(_), None) => MISSING.to_string(),
        (Some(code), _) if PROCESS_CODES.contains(&code) => format!("{}.txt", code),
        (_, file_name) => file_name.unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Design;

    fn aggregate(curves: Vec<CurveRecord>) -> DesignAggregate {
        Design::new("1", "1001", "DesignA").with_curves(curves)
    }

    fn data_line(report: &str) -> &str {
        report.lines().nth(1).unwrap()
    }

    #[test]
    fn test_header_row() {
        let header = ReportBuilder::default().header().join(",");
        assert_eq!(
            header,
            "Order,Design No,Design,Curve01,Curve02,Curve03,Curve04,Curve05,Curve06,Curve07,\
             Curve08,Curve09,Curve10,File01,File02,File03,File04,File05,File06,File07,File08,\
             File09,File10"
        );
    }

    #[test]
    fn test_empty_curves_fill_every_column_with_missing() {
        let builder = ReportBuilder::default();
        let row = builder.row(&aggregate(vec![]));

        assert_eq!(row.len(), 3 + 20 + 1);
        assert!(row[3..23].iter().all(|cell| cell == MISSING));
        assert_eq!(row[23], "");

        let report = builder.build(&[aggregate(vec![])]).unwrap();
        let expected = format!("1,1001,DesignA,{}", "Missing,".repeat(20));
        assert_eq!(data_line(&report), expected);
    }

    #[test]
    fn test_short_sequence_pads_with_single_space() {
        let curves = vec![
            CurveRecord::new(Some("C"), None),
            CurveRecord::new(Some("M"), Some("m2.txt")),
        ];
        let report = ReportBuilder::default().build(&[aggregate(curves)]).unwrap();

        assert_eq!(
            data_line(&report),
            "1,1001,DesignA,C,M, , , , , , , , ,Missing,M.txt, , , , , , , , ,"
        );
    }

    #[test]
    fn test_process_codes_use_canonical_file_names() {
        let curves = vec![
            CurveRecord::new(Some("C"), Some("cyan_v2.txt")),
            CurveRecord::new(Some("M"), Some("")),
            CurveRecord::new(Some("Y"), Some("yellow.txt")),
            CurveRecord::new(Some("K"), Some("black.crv")),
        ];
        let row = ReportBuilder::new(4).row(&aggregate(curves));

        assert_eq!(&row[7..11], &["C.txt", "M.txt", "Y.txt", "K.txt"]);
    }

    #[test]
    fn test_process_code_match_is_exact() {
        let curves = vec![
            CurveRecord::new(Some("c"), Some("c_custom.txt")),
            CurveRecord::new(Some("CM"), Some("cm.txt")),
        ];
        let row = ReportBuilder::new(2).row(&aggregate(curves));

        assert_eq!(&row[5..7], &["c_custom.txt", "cm.txt"]);
    }

    #[test]
    fn test_null_file_name_with_curve_code_is_missing() {
        let curves = vec![
            CurveRecord::new(Some("PMS186"), None),
            CurveRecord::new(Some(""), None),
        ];
        let row = ReportBuilder::new(2).row(&aggregate(curves));

        assert_eq!(&row[3..5], &["PMS186", ""]);
        assert_eq!(&row[5..7], &[MISSING, MISSING]);
    }

    #[test]
    fn test_null_curve_code_renders_empty_cells() {
        let curves = vec![
            CurveRecord::new(None, None),
            CurveRecord::new(None, Some("orphan.txt")),
        ];
        let row = ReportBuilder::new(2).row(&aggregate(curves));

        assert_eq!(&row[3..5], &["", ""]);
        assert_eq!(&row[5..7], &["", "orphan.txt"]);
    }

    #[test]
    fn test_longer_sequence_is_truncated_to_column_count() {
        let curves = (0..12)
            .map(|i| {
                CurveRecord::new(
                    Some(format!("P{}", i).as_str()),
                    Some(format!("p{}.txt", i).as_str()),
                )
            })
            .collect();
        let row = ReportBuilder::default().row(&aggregate(curves));

        assert_eq!(row.len(), 24);
        assert_eq!(row[12], "P9");
        assert_eq!(row[22], "p9.txt");
    }

    #[test]
    fn test_design_name_with_comma_is_quoted() {
        let aggregate = Design::new("2", "1002", "Rose, Red").with_curves(vec![]);
        let report = ReportBuilder::new(1).build(&[aggregate]).unwrap();

        assert_eq!(data_line(&report), "2,1002,\"Rose, Red\",Missing,Missing,");
    }

    #[test]
    fn test_build_is_deterministic() {
        let designs = vec![
            aggregate(vec![CurveRecord::new(Some("K"), Some("k.txt"))]),
            Design::new("2", "1002", "DesignB").with_curves(vec![]),
        ];
        let builder = ReportBuilder::default();

        let first = builder.build(&designs).unwrap();
        let second = builder.build(&designs).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.lines().count(), 3);
        assert!(first.ends_with('\n'));
    }
}
