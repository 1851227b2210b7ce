use crate::models::documents::entities::DocumentType;
use serde::Serialize;
use std::path::PathBuf;

/// 单个文件的处理结果
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Registered {
        document_id: Option<i64>,
        title: String,
        document_type: DocumentType,
        category: String,
        author_id: Option<i64>,
        author_name: String,
    },
    Skipped {
        reason: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub file_name: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// 一次导入的汇总
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestionReport {
    pub dry_run: bool,
    pub scanned: usize,
    pub registered: usize,
    pub skipped: usize,
    pub failed: usize,
    pub authors_created: usize,
    pub files: Vec<FileReport>,
}

impl IngestionReport {
    pub fn push(&mut self, report: FileReport) {
        match report.outcome {
            FileOutcome::Registered { .. } => self.registered += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
        self.files.push(report);
    }
}

impl std::fmt::Display for IngestionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for file in &self.files {
            match &file.outcome {
                FileOutcome::Registered {
                    title,
                    document_type,
                    category,
                    author_name,
                    ..
                } => writeln!(
                    f,
                    "[OK]   {} -> \"{}\" ({}, {}) by {}",
                    file.file_name, title, document_type, category, author_name
                )?,
                FileOutcome::Skipped { reason } => {
                    writeln!(f, "[SKIP] {}: {}", file.file_name, reason)?
                }
                FileOutcome::Failed { error } => {
                    writeln!(f, "[FAIL] {}: {}", file.file_name, error)?
                }
            }
        }
        write!(
            f,
            "{}scanned: {}, registered: {}, skipped: {}, failed: {}, authors created: {}",
            if self.dry_run { "(dry run) " } else { "" },
            self.scanned,
            self.registered,
            self.skipped,
            self.failed,
            self.authors_created
        )
    }
}
