use crate::domain::model::Design;
use crate::utils::error::{EtlError, Result};
use csv::{ReaderBuilder, StringRecord};

const REQUIRED_FIELDS: usize = 3;

/// 解析花號清單
///
/// 第一個實體行一律視為表頭丟棄（即使是空行）；其餘每行取前三欄（順序、花號、花名），
/// 多的欄位忽略。欄位不足三欄（含空行）時直接失敗並指出行號。
/// 檔尾的單一換行不算空行。
pub fn parse_manifest(data: &[u8]) -> Result<Vec<Design>> {
    let mut lines = data.split(|b| *b == b'\n').peekable();
    lines.next();

    let mut designs = Vec::new();
    let mut line_number: u64 = 1;
    while let Some(raw) = lines.next() {
        line_number += 1;
        let line = raw.strip_suffix(&b"\r"[..]).unwrap_or(raw);
        if line.is_empty() && lines.peek().is_none() {
            break;
        }

        let record = parse_line(line)?;
        if record.len() < REQUIRED_FIELDS {
            return Err(EtlError::ManifestParseError {
                line: line_number,
                message: format!(
                    "expected at least {} fields (order, design number, design name), found {}",
                    REQUIRED_FIELDS,
                    record.len()
                ),
            });
        }

        designs.push(Design::new(&record[0], &record[1], &record[2]));
    }

    tracing::debug!("Parsed {} designs from manifest", designs.len());
    Ok(designs)
}

fn parse_line(line: &[u8]) -> Result<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line);

    let mut record = StringRecord::new();
    // 空行讀不到任何紀錄，回傳零欄位
    reader.read_record(&mut record)?;
    Ok(record)
}
