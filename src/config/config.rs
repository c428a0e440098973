use clap::{Parser, ValueEnum};
use std::io;
use std::path::Path;

use crate::models::conversion::ConflictPolicy;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "doc_to_markdown",
    about = "以互動方式選擇文件並透過 docling 轉換為 Markdown",
    long_about = "互動式文件轉 Markdown 工具。選擇輸入文件與輸出資料夾後，由 docling 完成轉換並寫入 .md 檔。\n支援格式：pdf, docx, doc, pptx, ppt, html, txt, xlsx, csv, xml。\n不帶參數執行時使用預設配置。"
)]
pub struct Cli {
    /// 檔案瀏覽器的起始目錄
    #[arg(long, default_value = ".")]
    pub start_dir: String,
    /// docling 執行檔
    #[arg(long, default_value = "docling")]
    pub docling: String,
    #[arg(long, default_value = "prompt")]
    pub on_conflict: ConflictMode,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["error", "warn", "info", "debug"])]
    pub log_level: String,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

/// 輸出檔同名衝突的處理模式；`Prompt` 交由使用者決定
#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug)]
pub enum ConflictMode {
    Prompt,
    Overwrite,
    Rename,
}

impl ConflictMode {
    /// 不需詢問時直接對應的寫入策略
    pub fn preset_policy(&self) -> Option<ConflictPolicy> {
        match self {
            ConflictMode::Prompt => None,
            ConflictMode::Overwrite => Some(ConflictPolicy::Overwrite),
            ConflictMode::Rename => Some(ConflictPolicy::Rename),
        }
    }
}

pub fn validate_start_dir(start_dir: &str) -> io::Result<&Path> {
    let path = Path::new(start_dir);
    if !path.is_dir() {
        log::error!("起始目錄不存在：{}", start_dir);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("起始目錄 '{}' 不存在或不是目錄", start_dir),
        ));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_interactive_defaults() {
        let cli = Cli::parse_from(["doc_to_markdown"]);
        assert_eq!(cli.start_dir, ".");
        assert_eq!(cli.docling, "docling");
        assert_eq!(cli.on_conflict, ConflictMode::Prompt);
        assert_eq!(cli.log_level, "info");
        assert!(!cli.no_progress);
    }

    #[test]
    fn parses_conflict_mode_and_flags() {
        let cli = Cli::parse_from([
            "doc_to_markdown",
            "--on-conflict",
            "rename",
            "--no-progress",
            "--docling",
            "/opt/docling/bin/docling",
        ]);
        assert_eq!(cli.on_conflict.preset_policy(), Some(ConflictPolicy::Rename));
        assert!(cli.no_progress);
        assert_eq!(cli.docling, "/opt/docling/bin/docling");
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["doc_to_markdown", "--log-level", "trace"]).is_err());
    }

    #[test]
    fn start_dir_must_be_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(validate_start_dir(&tmp.path().to_string_lossy()).is_ok());
        let file = tmp.path().join("f.txt");
        std::fs::write(&file, "x").unwrap();
        let err = validate_start_dir(&file.to_string_lossy()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
