use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::errors::{PortalError, Result};
use crate::utils::file_magic::extension_of;
use crate::utils::validate_magic_bytes;

/// 扫描到的候选 PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfCandidate {
    pub path: PathBuf,
    pub file_name: String,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

fn has_pdf_header(path: &Path) -> std::io::Result<bool> {
    let mut header = [0u8; 8];
    let mut file = File::open(path)?;
    let mut filled = 0;
    while filled < header.len() {
        let n = file.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(validate_magic_bytes(&header[..filled], ".pdf"))
}

/// 递归扫描目录，返回按路径排序的 PDF 文件
///
/// 隐藏文件和目录被忽略；扩展名为 `.pdf` 但文件头不是 `%PDF` 的文件记录警告后跳过。
pub fn scan_library(dir: &Path) -> Result<Vec<PdfCandidate>> {
    if !dir.is_dir() {
        return Err(PortalError::file_operation(format!(
            "文档目录不存在: {}",
            dir.display()
        )));
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str().map(String::from) else {
            warn!("Skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };
        if extension_of(&file_name).as_deref() != Some(".pdf") {
            continue;
        }
        match has_pdf_header(entry.path()) {
            Ok(true) => candidates.push(PdfCandidate {
                path: entry.path().to_path_buf(),
                file_name,
            }),
            Ok(false) => warn!("Skipping {}: missing %PDF header", entry.path().display()),
            Err(e) => warn!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    candidates.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("Found {} PDF file(s) in {}", candidates.len(), dir.display());
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/nested")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();

        fs::write(root.join("b/nested/Radar.PDF"), b"%PDF-1.4 radar").unwrap();
        fs::write(root.join("a.pdf"), b"%PDF-1.7 a").unwrap();
        fs::write(root.join("fake.pdf"), b"<html>").unwrap();
        fs::write(root.join("notes.txt"), b"%PDF-1.4").unwrap();
        fs::write(root.join(".hidden.pdf"), b"%PDF-1.4").unwrap();
        fs::write(root.join(".cache/c.pdf"), b"%PDF-1.4").unwrap();
        fs::write(root.join("short.pdf"), b"%P").unwrap();

        let found = scan_library(root).unwrap();
        let names: Vec<&str> = found.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "Radar.PDF"]);
        assert!(found[1].path.ends_with("b/nested/Radar.PDF"));
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_library(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.code(), "E006");
    }
}
