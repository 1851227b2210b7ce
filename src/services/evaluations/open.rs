use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::evaluations::responses::EvaluationFormResponse;
use crate::models::professors::entities::Professor;
use crate::models::qr_tokens::entities::QrToken;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

/// 解析令牌并找到对应的激活教师，任何一步失败都视为令牌无效
pub(crate) async fn resolve_token(
    storage: &dyn Storage,
    token: &str,
) -> Result<(QrToken, Professor)> {
    let invalid = || PortalError::not_found("Evaluation token is invalid or expired");

    let qr = storage
        .get_valid_qr_token(token.trim())
        .await?
        .ok_or_else(invalid)?;
    let professor = storage
        .get_professor_by_id(qr.professor_id)
        .await?
        .filter(|p| p.active)
        .ok_or_else(invalid)?;
    Ok((qr, professor))
}

pub(crate) async fn open_form(
    storage: &dyn Storage,
    config: &AppConfig,
    token: &str,
) -> Result<EvaluationFormResponse> {
    let (qr, professor) = resolve_token(storage, token).await?;
    storage.increment_qr_token_uses(qr.id).await?;

    Ok(EvaluationFormResponse {
        professor: professor.public_profile(),
        min_rating: config.evaluation.min_rating,
        max_rating: config.evaluation.max_rating,
    })
}

pub async fn handle_open_form(
    service: &EvaluationService,
    request: &HttpRequest,
    token: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match open_form(storage.as_ref(), service.get_config(), &token).await {
        Ok(form) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            form,
            "Evaluation form retrieved successfully",
        ))),
        Err(PortalError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::QrTokenInvalid, msg))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, professor_request};

    #[tokio::test]
    async fn test_open_form_counts_uses() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let p = storage
            .create_professor(professor_request("V-7000001", "Rosa", "Peña", true))
            .await
            .unwrap();
        let qr = storage
            .create_qr_token(p.id, "5f0c7a1e-0000-4000-8000-000000000001", None)
            .await
            .unwrap();

        let form = open_form(&storage, AppConfig::get(), &qr.token)
            .await
            .unwrap();
        assert_eq!(form.professor.full_name, "Rosa Peña");
        assert_eq!(form.professor.subjects.len(), 2);
        open_form(&storage, AppConfig::get(), &qr.token)
            .await
            .unwrap();

        let reloaded = storage.get_active_qr_token(p.id).await.unwrap().unwrap();
        assert_eq!(reloaded.uses, 2);
    }

    #[tokio::test]
    async fn test_open_form_rejects_stale_tokens() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let p = storage
            .create_professor(professor_request("V-7000002", "Juan", "Gil", true))
            .await
            .unwrap();
        let expired = chrono::Utc::now() - chrono::Duration::days(1);
        storage
            .create_qr_token(p.id, "expired-token", Some(expired))
            .await
            .unwrap();

        let err = open_form(&storage, AppConfig::get(), "expired-token")
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));

        let err = open_form(&storage, AppConfig::get(), "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
