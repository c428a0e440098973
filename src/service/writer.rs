use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::ConvertResult;
use crate::models::conversion::ConflictPolicy;
use crate::service::traits::i_service::MarkdownWriterTrait;
use crate::utils::utils::{format_file_size, sanitize_file_name};

/// Markdown 寫入服務，負責把轉換結果落地為 .md 檔
pub struct MarkdownWriter;

impl MarkdownWriter {
    pub fn new() -> Self {
        MarkdownWriter
    }
}

impl Default for MarkdownWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownWriterTrait for MarkdownWriter {
    fn target_path(&self, output_dir: &Path, suggested_name: &str) -> PathBuf {
        output_dir.join(format!("{}.md", sanitize_file_name(suggested_name)))
    }

    fn write(
        &self,
        markdown: &str,
        output_dir: &Path,
        suggested_name: &str,
        policy: ConflictPolicy,
    ) -> ConvertResult<PathBuf> {
        fs::create_dir_all(output_dir)?;
        let target = self.target_path(output_dir, suggested_name);

        let (path, file) = match policy {
            ConflictPolicy::Overwrite => {
                if target.exists() {
                    warn!("覆寫既有檔案：{}", target.display());
                }
                replace_file(markdown, output_dir, &target)?;
                info!("已寫入 Markdown：{}，大小：{}", target.display(), format_file_size(markdown.len()));
                return Ok(target);
            }
            ConflictPolicy::Fail => {
                let file = OpenOptions::new().write(true).create_new(true).open(&target)?;
                (target, file)
            }
            ConflictPolicy::Rename => open_free_name(output_dir, suggested_name, &target)?,
        };

        let mut writer = BufWriter::new(file);
        writer.write_all(markdown.as_bytes())?;
        writer.flush()?;
        info!("已寫入 Markdown：{}，大小：{}", path.display(), format_file_size(markdown.len()));
        Ok(path)
    }
}

// 先寫入同目錄的暫存檔再改名覆蓋，寫入失敗時舊檔保持原樣
fn replace_file(markdown: &str, output_dir: &Path, target: &Path) -> io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(output_dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        writer.write_all(markdown.as_bytes())?;
        writer.flush()?;
    }
    tmp.persist(target)?;
    Ok(())
}

// 依序嘗試 name.md、name (1).md、name (2).md……，以 create_new 避免覆蓋
fn open_free_name(output_dir: &Path, suggested_name: &str, target: &Path) -> io::Result<(PathBuf, fs::File)> {
    let stem = sanitize_file_name(suggested_name);
    let mut candidate = target.to_path_buf();
    let mut n = 0u32;
    loop {
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => {
                if n > 0 {
                    info!("目標已存在，改名為：{}", candidate.display());
                }
                return Ok((candidate, file));
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && n < 10_000 => {
                n += 1;
                candidate = output_dir.join(format!("{} ({}).md", stem, n));
            }
            Err(e) => return Err(e),
        }
    }
}
