use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DocumentService;
use crate::middlewares::RequireJWT;
use crate::models::documents::entities::DocumentType;
use crate::models::documents::requests::CreateDocumentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::uploads::{MultipartForm, UploadRules, read_multipart};
use crate::services::{bad_request, unauthorized};
use crate::utils::text::split_keywords;
use crate::utils::validate::validate_required;

/// 由表单构建文档记录，作者为上传的教师
fn build_document(form: &MultipartForm, author_id: i64) -> Result<CreateDocumentRequest, String> {
    let title = form.text("title").unwrap_or_default();
    let category = form.text("category").unwrap_or_default();
    validate_required("title", &title)?;
    validate_required("category", &category)?;
    let document_type = form
        .text("document_type")
        .ok_or_else(|| "document_type is required".to_string())?
        .parse::<DocumentType>()?;

    // 日期格式错误时忽略
    let publication_date = form
        .text("publication_date")
        .and_then(|d| chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok());

    let external_url = form.text("external_url");
    if let Some(url) = &external_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err("external_url must be an http(s) URL".to_string());
    }

    Ok(CreateDocumentRequest {
        title,
        description: form.text("description"),
        author_id,
        document_type,
        category,
        pdf_file: form.file.as_ref().map(|f| f.stored_name.clone()),
        external_url,
        isbn: form.text("isbn"),
        publication_date,
        keywords: split_keywords(form.text("keywords").as_deref()),
    })
}

pub async fn handle_upload_document(
    service: &DocumentService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let Some(professor) = RequireJWT::extract_professor(request) else {
        return Ok(unauthorized());
    };
    let config = service.get_config();

    let rules = UploadRules {
        file_field: "pdf_file",
        allowed_types: &config.upload.document_types,
        max_size: config.upload.max_document_size,
        upload_dir: &config.upload.dir,
    };
    let form = match read_multipart(payload, &rules).await {
        Ok(form) => form,
        Err(response) => return Ok(response),
    };

    let document = match build_document(&form, professor.id) {
        Ok(document) => document,
        Err(msg) => {
            form.discard_file();
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
    };

    let storage = service.get_storage(request)?;
    match storage.create_document(document).await {
        Ok(document) => {
            tracing::info!(
                "Professor {} uploaded document {}",
                professor.id,
                document.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                document,
                "Document uploaded successfully",
            )))
        }
        Err(e) => {
            form.discard_file();
            tracing::error!("Failed to create document: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::DocumentCreationFailed,
                    "Failed to create document",
                )),
            )
        }
    }
}
