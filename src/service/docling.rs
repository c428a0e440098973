use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, error, info};

use crate::error::{ConvertError, ConvertResult};
use crate::models::conversion::ConversionResult;
use crate::models::format::SourceFormat;
use crate::service::traits::i_service::DocumentConverter;

pub const DEFAULT_DOCLING_PROGRAM: &str = "docling";

/// 透過 docling 命令列工具進行轉換
///
/// 每次轉換在獨立的暫存目錄中執行：`docling <input> --to md --output <tmp>`，
/// 完成後讀回 `<tmp>/<stem>.md`，暫存目錄隨即刪除。
pub struct DoclingConverter {
    program: OsString,
    leading_args: Vec<OsString>,
}

impl DoclingConverter {
    pub fn new(program: impl Into<OsString>) -> Self {
        DoclingConverter {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// 在輸入路徑之前附加的參數，例如以直譯器執行腳本時的腳本路徑
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }
}

impl Default for DoclingConverter {
    fn default() -> Self {
        Self::new(DEFAULT_DOCLING_PROGRAM)
    }
}

impl DocumentConverter for DoclingConverter {
    fn convert(&self, input: &Path) -> ConvertResult<ConversionResult> {
        if !input.is_file() {
            error!("檔案不存在：{}", input.display());
            return Err(ConvertError::InputNotFound(input.to_path_buf()));
        }
        let source_format = SourceFormat::from_path(input)?;

        let scratch = tempfile::Builder::new().prefix("doc_to_markdown").tempdir()?;
        info!("轉換中：{}（{}）", input.display(), source_format);
        debug!(
            "執行：{} {:?} {} --to md --output {}",
            self.program_name(),
            self.leading_args,
            input.display(),
            scratch.path().display()
        );

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(input)
            .args(["--to", "md", "--output"])
            .arg(scratch.path())
            .output()
            .map_err(|e| {
                error!("無法啟動 {}：{}", self.program_name(), e);
                ConvertError::conversion(input, format!("無法啟動 {}：{}", self.program_name(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("{} 異常結束（{}）", self.program_name(), output.status)
            } else {
                stderr
            };
            error!("轉換 {} 時發生錯誤：{}", input.display(), message);
            return Err(ConvertError::conversion(input, message));
        }

        let markdown_path = locate_markdown(scratch.path(), input)
            .ok_or_else(|| ConvertError::conversion(input, "轉換程式未產生 Markdown 檔案"))?;
        let markdown = fs::read_to_string(&markdown_path)?;
        if markdown.trim().is_empty() {
            return Err(ConvertError::conversion(input, "轉換結果為空"));
        }

        info!("轉換成功：{}，{} 位元組", input.display(), markdown.len());
        Ok(ConversionResult { markdown, source_format })
    }
}

// 優先取 <stem>.md，否則取暫存目錄中第一個 .md 檔
fn locate_markdown(scratch: &Path, input: &Path) -> Option<PathBuf> {
    if let Some(stem) = input.file_stem() {
        let mut name = stem.to_os_string();
        name.push(".md");
        let expected = scratch.join(name);
        if expected.is_file() {
            return Some(expected);
        }
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(scratch)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().map_or(false, |e| e.eq_ignore_ascii_case("md")))
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    // 模擬 docling 的腳本：依 --output 寫入 <stem>.md
    const STUB_OK: &str = r#"
in="$1"; shift
while [ $# -gt 0 ]; do
  case "$1" in
    --output) out="$2"; shift ;;
  esac
  shift
done
name=$(basename "$in")
stem="${name%.*}"
printf '# %s\n\n%s\n' "$stem" "$(cat "$in")" > "$out/$stem.md"
"#;

    fn stub(dir: &Path, body: &str) -> DoclingConverter {
        let script = dir.join("docling_stub.sh");
        fs::write(&script, body).unwrap();
        DoclingConverter::new("sh").with_leading_args([script])
    }

    #[test]
    fn reads_markdown_written_by_engine() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("report.docx");
        fs::write(&input, "quarterly numbers").unwrap();

        let result = stub(tmp.path(), STUB_OK).convert(&input).unwrap();
        assert_eq!(result.source_format, SourceFormat::Docx);
        assert!(result.markdown.starts_with("# report"));
        assert!(result.markdown.contains("quarterly numbers"));
    }

    #[test]
    fn non_zero_exit_surfaces_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("locked.pdf");
        fs::write(&input, "%PDF").unwrap();

        let err = stub(tmp.path(), "echo 'password protected' >&2; exit 3")
            .convert(&input)
            .unwrap_err();
        match err {
            ConvertError::Conversion { message, .. } => assert_eq!(message, "password protected"),
            other => panic!("預期 Conversion，實際為 {:?}", other),
        }
    }

    #[test]
    fn missing_or_empty_output_is_conversion_error() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("notes.txt");
        fs::write(&input, "x").unwrap();

        let err = stub(tmp.path(), "exit 0").convert(&input).unwrap_err();
        assert!(matches!(err, ConvertError::Conversion { .. }));

        let blank = r#"while [ $# -gt 0 ]; do [ "$1" = "--output" ] && out="$2"; shift; done; printf '  \n' > "$out/notes.md""#;
        let err = stub(tmp.path(), blank).convert(&input).unwrap_err();
        assert!(matches!(err, ConvertError::Conversion { ref message, .. } if message.contains("空")));
    }

    #[test]
    fn falls_back_to_any_markdown_in_scratch_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("sheet.xlsx");
        fs::write(&input, "x").unwrap();

        let other = r#"while [ $# -gt 0 ]; do [ "$1" = "--output" ] && out="$2"; shift; done; printf '| a |\n' > "$out/Sheet1.md""#;
        let result = stub(tmp.path(), other).convert(&input).unwrap();
        assert_eq!(result.markdown, "| a |\n");
    }

    #[test]
    fn unknown_program_is_conversion_error() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("page.html");
        fs::write(&input, "<p>hi</p>").unwrap();

        let err = DoclingConverter::new("definitely-not-a-real-docling-binary")
            .convert(&input)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Conversion { ref message, .. } if message.contains("無法啟動")));
    }

    #[test]
    fn rejects_missing_and_unsupported_inputs_before_launch() {
        let tmp = tempfile::tempdir().unwrap();
        let converter = DoclingConverter::new("definitely-not-a-real-docling-binary");

        let err = converter.convert(&tmp.path().join("absent.pdf")).unwrap_err();
        assert!(matches!(err, ConvertError::InputNotFound(_)));

        let zip = tmp.path().join("bundle.zip");
        fs::write(&zip, "PK").unwrap();
        let err = converter.convert(&zip).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    }
}
