use std::path::PathBuf;

use crate::models::format::SourceFormat;

/// 同名 .md 已存在時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    Overwrite,
    Rename,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub conflict_policy: ConflictPolicy,
}

impl ConversionRequest {
    pub fn new(input_path: PathBuf, output_dir: PathBuf, conflict_policy: ConflictPolicy) -> Self {
        ConversionRequest { input_path, output_dir, conflict_policy }
    }

    /// 輸出檔名沿用輸入檔的主檔名
    pub fn suggested_name(&self) -> String {
        self.input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub markdown: String,
    pub source_format: SourceFormat,
}

#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub output_path: PathBuf,
    pub source_format: SourceFormat,
    pub markdown_bytes: usize,
}
