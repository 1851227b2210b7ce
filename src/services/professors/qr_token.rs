use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::ProfessorService;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::professors::responses::QrTokenResponse;
use crate::models::qr_tokens::entities::QrToken;
use crate::services::{error_response, unauthorized};
use crate::storage::Storage;

/// 按配置计算过期时间，TTL 不为正时永不过期
pub(crate) fn token_expiry(
    config: &AppConfig,
    now: chrono::DateTime<chrono::Utc>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    (config.evaluation.token_ttl_days > 0)
        .then(|| now + chrono::Duration::days(config.evaluation.token_ttl_days))
}

/// 返回教师当前可用的令牌，没有或已过期时签发新令牌
pub(crate) async fn ensure_active_token(
    storage: &dyn Storage,
    config: &AppConfig,
    professor_id: i64,
) -> Result<QrToken> {
    let now = chrono::Utc::now();
    if let Some(token) = storage.get_active_qr_token(professor_id).await?
        && token.is_valid_at(now)
    {
        return Ok(token);
    }

    let token = Uuid::new_v4().to_string();
    let issued = storage
        .rotate_qr_token(professor_id, &token, token_expiry(config, now))
        .await?;
    tracing::info!("Issued evaluation token for professor {}", professor_id);
    Ok(issued)
}

pub(crate) fn token_response(config: &AppConfig, token: QrToken) -> QrTokenResponse {
    QrTokenResponse {
        evaluation_url: config.evaluation_url(&token.token),
        token,
    }
}

pub async fn handle_rotate(
    service: &ProfessorService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(professor) = RequireJWT::extract_professor(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    let token = Uuid::new_v4().to_string();
    let expires_at = token_expiry(config, chrono::Utc::now());
    match storage.rotate_qr_token(professor.id, &token, expires_at).await {
        Ok(token) => {
            tracing::info!("Professor {} rotated evaluation token", professor.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                token_response(config, token),
                "Evaluation token rotated",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
