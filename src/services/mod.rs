pub mod auth;
pub mod chatbot;
pub mod documents;
pub mod evaluations;
pub mod professors;
pub mod suggestions;
pub mod system;
pub mod uploads;
pub mod videos;

pub use auth::AuthService;
pub use chatbot::ChatbotService;
pub use documents::DocumentService;
pub use evaluations::EvaluationService;
pub use professors::ProfessorService;
pub use suggestions::SuggestionService;
pub use system::SystemService;
pub use videos::VideoService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从应用数据中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not configured"))
}

/// 把存储层错误转换为统一的 JSON 响应，5xx 只记录日志不暴露细节
pub(crate) fn error_response(err: &PortalError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        tracing::error!("{}", err);
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(err.api_code(), err.public_message()))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}
