use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::auth::entities::UserType;
use crate::models::documents::requests::DocumentListParams;
use crate::services::DocumentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 DocumentService 实例
static DOCUMENT_SERVICE: Lazy<DocumentService> = Lazy::new(DocumentService::new_lazy);

// 文档库列表（公开）
pub async fn list_documents(
    req: HttpRequest,
    query: web::Query<DocumentListParams>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .list_documents(&req, query.into_inner())
        .await
}

// 教师上传文档
pub async fn upload_document(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.upload_document(&req, payload).await
}

// 下载文档（公开），计数后返回 PDF 或跳转到外部链接
pub async fn download_document(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.download_document(&req, path.0).await
}

// 配置路由
pub fn configure_document_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/documents")
            .service(
                web::resource("")
                    .route(web::get().to(list_documents))
                    .route(
                        web::post()
                            .to(upload_document)
                            .wrap(RateLimit::file_upload())
                            .wrap(middlewares::RequireRole::new(UserType::Professor))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .route("/{id}/download", web::get().to(download_document)),
    );
}
