use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 轉換流程中可能出現的錯誤，最終都會在殼層轉為狀態訊息
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("不支援的格式：{extension}（{path}）")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("檔案不存在：{0}")]
    InputNotFound(PathBuf),

    #[error("轉換 {path} 失敗：{message}")]
    Conversion { path: PathBuf, message: String },

    #[error("寫入失敗：{0}")]
    Io(#[from] io::Error),
}

impl ConvertError {
    pub fn conversion(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConvertError::Conversion {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;
