use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::suggestions::{SuggestionRequest, SuggestionResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bad_request;
use crate::utils::validate::{validate_email, validate_required};

// 意见内容的最大字符数
const MAX_MESSAGE_CHARS: usize = 5000;

pub struct SuggestionService;

pub(crate) fn validate_suggestion(req: &SuggestionRequest) -> Result<(), String> {
    validate_required("name", &req.name)?;
    validate_email(req.email.trim())?;
    let message = req.message.trim();
    if message.is_empty() {
        return Err("message is required".to_string());
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(format!("message must be at most {MAX_MESSAGE_CHARS} characters"));
    }
    Ok(())
}

impl SuggestionService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 提交意见，目前只记录日志
    pub async fn submit(
        &self,
        suggestion: SuggestionRequest,
        _request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_suggestion(&suggestion) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }

        tracing::info!(
            name = suggestion.name.trim(),
            email = suggestion.email.trim(),
            "Suggestion received: {}",
            suggestion.message.trim()
        );

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            SuggestionResponse {
                received_at: chrono::Utc::now(),
            },
            "Thank you for your suggestion, we will review it soon",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(name: &str, email: &str, message: &str) -> SuggestionRequest {
        SuggestionRequest {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_validate_suggestion() {
        assert!(validate_suggestion(&suggestion("Ana", "ana@umc.edu.ve", "Más horarios")).is_ok());
        assert!(validate_suggestion(&suggestion("", "ana@umc.edu.ve", "x")).is_err());
        assert!(validate_suggestion(&suggestion("Ana", "ana", "x")).is_err());
        assert!(validate_suggestion(&suggestion("Ana", "ana@umc.edu.ve", "  ")).is_err());
    }
}
