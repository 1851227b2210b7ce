use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::DocumentService;
use crate::config::AppConfig;
use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

/// 依次在上传目录、文档库目录及其子目录中查找文件
pub(crate) fn locate_pdf(config: &AppConfig, file_name: &str) -> Option<PathBuf> {
    // 只接受单纯的文件名
    if file_name.is_empty()
        || file_name.contains(['/', '\\'])
        || file_name == "."
        || file_name == ".."
    {
        return None;
    }

    let library = Path::new(&config.repository.library_dir);
    let direct = [Path::new(&config.upload.dir).join(file_name), library.join(file_name)];
    if let Some(found) = direct.into_iter().find(|p| p.is_file()) {
        return Some(found);
    }

    WalkDir::new(library)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
        .map(|entry| entry.into_path())
}

fn no_file_available() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::FileNotFound,
        "No file available for this document",
    ))
}

pub async fn handle_download_document(
    service: &DocumentService,
    request: &HttpRequest,
    document_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let document = match storage.get_document_by_id(document_id).await {
        Ok(Some(document)) => document,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::DocumentNotFound,
                "Document not found",
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    if let Err(e) = storage.increment_document_downloads(document.id).await {
        return Ok(error_response(&e));
    }

    if let Some(file_name) = &document.pdf_file {
        match locate_pdf(service.get_config(), file_name) {
            Some(path) => {
                let data = match std::fs::read(&path) {
                    Ok(data) => data,
                    Err(e) => {
                        return Ok(error_response(&PortalError::file_operation(format!(
                            "{}: {e}",
                            path.display()
                        ))));
                    }
                };
                return Ok(HttpResponse::Ok()
                    .insert_header((header::CONTENT_TYPE, "application/pdf"))
                    .insert_header((
                        header::CONTENT_DISPOSITION,
                        format!("inline; filename=\"{file_name}\""),
                    ))
                    .body(data));
            }
            None => tracing::warn!(
                "File {} of document {} is missing on disk",
                file_name,
                document.id
            ),
        }
    }

    match &document.external_url {
        Some(url) => Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, url.as_str()))
            .finish()),
        None => Ok(no_file_available()),
    }
}
