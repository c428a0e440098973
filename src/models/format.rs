use std::fmt;
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};

pub const SUPPORTED_EXTENSIONS: [&str; 10] = [
    ".pdf", ".docx", ".pptx", ".html", ".txt", ".csv", ".xlsx", ".ppt", ".doc", ".xml",
];

/// 轉換引擎接受的輸入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Pdf,
    Docx,
    Doc,
    Pptx,
    Ppt,
    Html,
    Txt,
    Xlsx,
    Csv,
    Xml,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 10] = [
        SourceFormat::Pdf,
        SourceFormat::Docx,
        SourceFormat::Doc,
        SourceFormat::Pptx,
        SourceFormat::Ppt,
        SourceFormat::Html,
        SourceFormat::Txt,
        SourceFormat::Xlsx,
        SourceFormat::Csv,
        SourceFormat::Xml,
    ];

    /// 副檔名不分大小寫，可帶或不帶前導點
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(SourceFormat::Pdf),
            "docx" => Some(SourceFormat::Docx),
            "doc" => Some(SourceFormat::Doc),
            "pptx" => Some(SourceFormat::Pptx),
            "ppt" => Some(SourceFormat::Ppt),
            "html" => Some(SourceFormat::Html),
            "txt" => Some(SourceFormat::Txt),
            "xlsx" => Some(SourceFormat::Xlsx),
            "csv" => Some(SourceFormat::Csv),
            "xml" => Some(SourceFormat::Xml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> ConvertResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_extension(&ext).ok_or_else(|| ConvertError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: if ext.is_empty() { "（無副檔名）".to_string() } else { format!(".{}", ext) },
        })
    }

    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Docx => "docx",
            SourceFormat::Doc => "doc",
            SourceFormat::Pptx => "pptx",
            SourceFormat::Ppt => "ppt",
            SourceFormat::Html => "html",
            SourceFormat::Txt => "txt",
            SourceFormat::Xlsx => "xlsx",
            SourceFormat::Csv => "csv",
            SourceFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_ascii_uppercase())
    }
}

pub fn supported_formats_label() -> String {
    format!("支援格式：{}", SUPPORTED_EXTENSIONS.join(", "))
}
