use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::RepositoryConfig;
use crate::errors::Result;
use crate::models::documents::requests::CreateDocumentRequest;
use crate::models::ingestion::{FileOutcome, FileReport, IngestionReport};
use crate::storage::Storage;
use crate::utils::text::{humanize_file_stem, split_keywords};

use super::authors::AuthorResolver;
use super::classify::classify;
use super::pdf_metadata::read_metadata;
use super::scanner::{PdfCandidate, scan_library};

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub library_dir: PathBuf,
    /// 只解析和分类，不写数据库
    pub dry_run: bool,
}

/// 扫描文档目录并登记尚未入库的 PDF
///
/// 单个文件失败只记录在报告中；目录不可读或加载教师列表失败时整体返回错误。
pub async fn run_ingestion(
    storage: &dyn Storage,
    config: &RepositoryConfig,
    options: &IngestOptions,
) -> Result<IngestionReport> {
    let candidates = scan_library(&options.library_dir)?;
    info!(
        "Scanning {}: {} PDF file(s){}",
        options.library_dir.display(),
        candidates.len(),
        if options.dry_run { " (dry run)" } else { "" }
    );

    let mut resolver = AuthorResolver::new(storage, config, options.dry_run).await?;
    let mut report = IngestionReport {
        dry_run: options.dry_run,
        scanned: candidates.len(),
        ..Default::default()
    };
    let mut seen = HashSet::new();

    for candidate in candidates {
        // 只有登记成功或已登记的文件名才占用名额，失败的文件不挡住后面的同名文件
        let outcome = if seen.contains(&candidate.file_name) {
            FileOutcome::Skipped {
                reason: "duplicate file name in this run".to_string(),
            }
        } else {
            match ingest_file(storage, &mut resolver, &candidate, options.dry_run).await {
                Ok((outcome, author_created)) => {
                    if author_created {
                        report.authors_created += 1;
                    }
                    seen.insert(candidate.file_name.clone());
                    outcome
                }
                Err(e) => {
                    warn!("Failed to ingest {}: {}", candidate.path.display(), e);
                    FileOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            }
        };
        report.push(FileReport {
            path: candidate.path,
            file_name: candidate.file_name,
            outcome,
        });
    }

    info!(
        "Ingestion finished: registered {}, skipped {}, failed {}, authors created {}",
        report.registered, report.skipped, report.failed, report.authors_created
    );
    Ok(report)
}

/// 处理单个文件，返回结果和是否新建了作者
async fn ingest_file(
    storage: &dyn Storage,
    resolver: &mut AuthorResolver<'_>,
    candidate: &PdfCandidate,
    dry_run: bool,
) -> Result<(FileOutcome, bool)> {
    if storage
        .document_exists_by_pdf_file(&candidate.file_name)
        .await?
    {
        return Ok((
            FileOutcome::Skipped {
                reason: "already registered".to_string(),
            },
            false,
        ));
    }

    let meta = read_metadata(&candidate.path)?;
    let title = meta
        .title
        .clone()
        .unwrap_or_else(|| humanize_file_stem(&candidate.file_name));
    let classification = classify(&candidate.file_name, &meta);
    let author = resolver.resolve(meta.author.as_deref()).await?;

    let document_id = match (dry_run, author.id) {
        (false, Some(author_id)) => {
            let document = storage
                .create_document(CreateDocumentRequest {
                    title: title.clone(),
                    description: meta.subject.clone(),
                    author_id,
                    document_type: classification.document_type,
                    category: classification.category.clone(),
                    pdf_file: Some(candidate.file_name.clone()),
                    external_url: None,
                    isbn: None,
                    publication_date: meta.creation_date,
                    keywords: split_keywords(meta.keywords.as_deref()),
                })
                .await?;
            info!("Registered {} as document {}", candidate.file_name, document.id);
            Some(document.id)
        }
        _ => None,
    };

    Ok((
        FileOutcome::Registered {
            document_id,
            title,
            document_type: classification.document_type,
            category: classification.category,
            author_id: author.id,
            author_name: author.name,
        },
        author.created,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::pdf_metadata::tests::{literal, write_pdf};
    use crate::models::documents::entities::DocumentType;
    use crate::models::documents::requests::DocumentListQuery;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, professor_request};
    use std::fs;
    use std::path::Path;

    fn repository_config() -> RepositoryConfig {
        RepositoryConfig {
            library_dir: "unused".to_string(),
            default_author_name: "Autor Desconocido".to_string(),
            default_author_email: "repositorio@umc.edu.ve".to_string(),
            placeholder_department: "Repositorio Digital".to_string(),
        }
    }

    fn seed_library(root: &Path) {
        fs::create_dir_all(root.join("2020")).unwrap();
        write_pdf(
            &root.join("Manual_de_Radar.pdf"),
            &[
                ("Author", literal("Ing. Carlos Rivas")),
                ("Keywords", literal("radar, arpa")),
                ("CreationDate", literal("D:20190315")),
            ],
        );
        write_pdf(
            &root.join("2020/tesis_puerto.pdf"),
            &[
                ("Title", literal("Optimizacion del Puerto de La Guaira")),
                ("Author", literal("Pedro Salas")),
                ("Subject", literal("Trabajo de grado")),
            ],
        );
        write_pdf(&root.join("2020/sin_autor.pdf"), &[]);
        // 同名文件出现在另一个目录
        write_pdf(&root.join("sin_autor.pdf"), &[]);
        fs::write(root.join("roto.pdf"), b"%PDF-1.4\ngarbage").unwrap();
    }

    fn outcome<'a>(report: &'a IngestionReport, path: &Path) -> &'a FileOutcome {
        &report
            .files
            .iter()
            .find(|f| f.path == path)
            .unwrap()
            .outcome
    }

    #[tokio::test]
    async fn test_full_run_and_rerun() {
        let dir = tempfile::tempdir().unwrap();
        seed_library(dir.path());
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let carlos = storage
            .create_professor(professor_request("V-3000001", "Carlos", "Rivas", true))
            .await
            .unwrap();
        let config = repository_config();
        let options = IngestOptions {
            library_dir: dir.path().to_path_buf(),
            dry_run: false,
        };

        let report = run_ingestion(&storage, &config, &options).await.unwrap();
        assert_eq!(report.scanned, 5);
        assert_eq!(report.registered, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
        // Pedro Salas 和默认作者
        assert_eq!(report.authors_created, 2);

        // 按路径排序，2020/ 下的同名文件先被登记
        assert!(matches!(
            outcome(&report, &dir.path().join("2020/sin_autor.pdf")),
            FileOutcome::Registered { author_name, .. } if author_name == "Autor Desconocido"
        ));
        assert!(matches!(
            outcome(&report, &dir.path().join("sin_autor.pdf")),
            FileOutcome::Skipped { .. }
        ));
        match outcome(&report, &dir.path().join("Manual_de_Radar.pdf")) {
            FileOutcome::Registered {
                document_type,
                category,
                author_id,
                ..
            } => {
                assert_eq!(*document_type, DocumentType::Manual);
                assert_eq!(category, "Navegación");
                assert_eq!(*author_id, Some(carlos.id));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(
            outcome(&report, &dir.path().join("roto.pdf")),
            FileOutcome::Failed { .. }
        ));
        match outcome(&report, &dir.path().join("2020/tesis_puerto.pdf")) {
            FileOutcome::Registered {
                document_type,
                category,
                author_name,
                document_id,
                ..
            } => {
                assert_eq!(*document_type, DocumentType::Thesis);
                assert_eq!(category, "Logística Portuaria");
                assert_eq!(author_name, "Pedro Salas");
                assert!(document_id.is_some());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let page = storage
            .list_documents_with_pagination(DocumentListQuery {
                page: 1,
                size: 10,
                category: None,
                document_type: None,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 3);

        // 第二次运行全部跳过，不再创建作者
        let rerun = run_ingestion(&storage, &config, &options).await.unwrap();
        assert_eq!(rerun.registered, 0);
        assert_eq!(rerun.skipped, 4);
        assert_eq!(rerun.failed, 1);
        assert_eq!(rerun.authors_created, 0);
    }

    #[tokio::test]
    async fn test_failed_copy_does_not_block_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/radar.pdf"), b"%PDF-1.4\ngarbage").unwrap();
        write_pdf(&root.join("radar.pdf"), &[("Title", literal("Radar ARPA"))]);

        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let options = IngestOptions {
            library_dir: root.to_path_buf(),
            dry_run: false,
        };

        let report = run_ingestion(&storage, &repository_config(), &options)
            .await
            .unwrap();
        assert_eq!(report.registered, 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.failed, 1);
        assert!(matches!(
            outcome(&report, &root.join("radar.pdf")),
            FileOutcome::Registered { .. }
        ));
        assert!(storage.document_exists_by_pdf_file("radar.pdf").await.unwrap());

        // 再次运行：文件名已登记，两份都跳过
        let rerun = run_ingestion(&storage, &repository_config(), &options)
            .await
            .unwrap();
        assert_eq!(rerun.registered, 0);
        assert_eq!(rerun.failed, 0);
        assert_eq!(rerun.skipped, 2);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        seed_library(dir.path());
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let options = IngestOptions {
            library_dir: dir.path().to_path_buf(),
            dry_run: true,
        };

        let report = run_ingestion(&storage, &repository_config(), &options)
            .await
            .unwrap();
        assert!(report.dry_run);
        assert_eq!(report.registered, 3);
        assert_eq!(report.authors_created, 3);
        assert_eq!(storage.count_professors().await.unwrap(), 0);
        assert!(
            !storage
                .document_exists_by_pdf_file("tesis_puerto.pdf")
                .await
                .unwrap()
        );
    }
}
