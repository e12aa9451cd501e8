use crate::domain::ports::CurveInventory;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

pub const DEFAULT_CURVE_EXTENSION: &str = "txt";

/// 列出曲線定義目錄中的檔案（不遞迴子目錄）
#[derive(Debug, Clone)]
pub struct DirectoryInventory {
    dir: PathBuf,
    extension: String,
}

impl DirectoryInventory {
    /// `extension` 為空字串時列出所有檔案
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    fn matches_extension(&self, file_name: &str) -> bool {
        if self.extension.is_empty() {
            return true;
        }
        std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }

    fn inventory_error(&self, e: std::io::Error) -> EtlError {
        EtlError::InventoryError {
            path: self.dir.display().to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl CurveInventory for DirectoryInventory {
    async fn list_curve_file_names(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| self.inventory_error(e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| self.inventory_error(e))? {
            let file_type = entry.file_type().await.map_err(|e| self.inventory_error(e))?;
            if !file_type.is_file() {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!("Skipping non UTF-8 file name in {}", self.dir.display());
                continue;
            };

            if self.matches_extension(&name) {
                names.push(name);
            }
        }

        // read_dir 不保證順序
        names.sort();
        tracing::info!(
            "📂 Found {} curve files in {}",
            names.len(),
            self.dir.display()
        );
        Ok(names)
    }
}
