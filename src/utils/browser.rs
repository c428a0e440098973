use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::format::SourceFormat;

/// 檔案瀏覽清單中的一個項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEntry {
    Parent(PathBuf),
    Directory(PathBuf),
    File(PathBuf),
}

impl BrowserEntry {
    pub fn label(&self) -> String {
        match self {
            BrowserEntry::Parent(_) => "../".to_string(),
            BrowserEntry::Directory(path) => format!("{}/", file_name(path)),
            BrowserEntry::File(path) => file_name(path),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 列出目錄內容：上層目錄、子目錄，再來是支援格式的檔案
///
/// 隱藏項目（以 `.` 開頭）不列出；`include_files` 為 false 時只列目錄。
pub fn list_entries(dir: &Path, include_files: bool) -> io::Result<Vec<BrowserEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if file_name(&path).starts_with('.') {
            continue;
        }
        if path.is_dir() {
            dirs.push(path);
        } else if include_files && path.is_file() && SourceFormat::is_supported(&path) {
            files.push(path);
        }
    }

    let by_name = |a: &PathBuf, b: &PathBuf| file_name(a).to_lowercase().cmp(&file_name(b).to_lowercase());
    dirs.sort_by(by_name);
    files.sort_by(by_name);

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = dir.parent() {
        entries.push(BrowserEntry::Parent(parent.to_path_buf()));
    }
    entries.extend(dirs.into_iter().map(BrowserEntry::Directory));
    entries.extend(files.into_iter().map(BrowserEntry::File));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("Zeta")).unwrap();
        fs::create_dir(tmp.path().join("alpha")).unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        for name in ["b.pdf", "A.docx", "archive.zip", ".hidden.txt", "notes.TXT"] {
            fs::write(tmp.path().join(name), "x").unwrap();
        }
        tmp
    }

    #[test]
    fn lists_directories_then_supported_files() {
        let tmp = fixture();
        let labels: Vec<String> = list_entries(tmp.path(), true)
            .unwrap()
            .iter()
            .map(BrowserEntry::label)
            .collect();
        assert_eq!(labels, ["../", "alpha/", "Zeta/", "A.docx", "b.pdf", "notes.TXT"]);
    }

    #[test]
    fn directory_mode_skips_files() {
        let tmp = fixture();
        let entries = list_entries(tmp.path(), false).unwrap();
        assert!(entries.iter().all(|e| !matches!(e, BrowserEntry::File(_))));
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], BrowserEntry::Parent(tmp.path().parent().unwrap().to_path_buf()));
    }

    #[test]
    fn missing_directory_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(list_entries(&tmp.path().join("gone"), true).is_err());
    }
}
