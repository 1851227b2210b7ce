use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::middlewares::require_jwt::{RequireJWT, load_auth_user};
use crate::models::auth::responses::{RefreshTokenResponse, UserInfoResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::unauthorized;
use crate::utils::jwt::JwtUtils;

fn login_expired() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Login expired or invalid, please login again",
    ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(unauthorized());
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            return Ok(login_expired());
        }
    };

    // 账户被删除或停用后不再续期
    let (Some(user_type), Some(account_id)) = (claims.user_type(), claims.account_id()) else {
        return Ok(login_expired());
    };
    let storage = service.get_storage(request)?;
    match load_auth_user(storage.as_ref(), user_type, account_id).await {
        Ok(Some(user)) if user.is_active() => {}
        Ok(_) => return Ok(login_expired()),
        Err(e) => {
            tracing::error!("Refresh token lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error",
                )),
            );
        }
    }

    match JwtUtils::generate_access_token(account_id, &claims.role) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: JwtUtils::access_token_ttl_secs(),
            },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to generate access token: {}", e);
            Ok(login_expired())
        }
    }
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_auth_user(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        ))),
        None => Ok(unauthorized()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::UserType;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::services::auth::tests::{body_json, service_with};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::jwt::REFRESH_TOKEN_COOKIE;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use std::sync::Arc;

    fn student(cedula: &str, active: bool) -> CreateStudentRequest {
        CreateStudentRequest {
            cedula: cedula.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Torres".to_string(),
            email: format!("{}@umc.edu.ve", cedula.to_lowercase()),
            phone: None,
            birth_date: None,
            address: None,
            semester: 2,
            password_hash: "hash".to_string(),
            active,
        }
    }

    fn refresh_request(token: &str) -> HttpRequest {
        actix_test::TestRequest::default()
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, token.to_string()))
            .to_http_request()
    }

    #[tokio::test]
    async fn test_refresh_issues_access_token_for_active_account() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let active = storage.create_student(student("V-20111222", true)).await.unwrap();
        let service = service_with(Arc::new(storage));

        let refresh = JwtUtils::generate_refresh_token(active.id, UserType::STUDENT, None).unwrap();
        let resp = handle_refresh_token(&service, &refresh_request(&refresh))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let access = body["data"]["access_token"].as_str().unwrap();
        let claims = JwtUtils::verify_access_token(access).unwrap();
        assert_eq!(claims.account_id(), Some(active.id));
    }

    #[tokio::test]
    async fn test_refresh_rechecks_account_state() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let inactive = storage.create_student(student("V-20111333", false)).await.unwrap();
        let service = service_with(Arc::new(storage));

        // 账户已停用
        let refresh = JwtUtils::generate_refresh_token(inactive.id, UserType::STUDENT, None).unwrap();
        let resp = handle_refresh_token(&service, &refresh_request(&refresh))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // 账户不存在
        let refresh = JwtUtils::generate_refresh_token(9999, UserType::STUDENT, None).unwrap();
        let resp = handle_refresh_token(&service, &refresh_request(&refresh))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token_and_missing_cookie() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let active = storage.create_student(student("V-20111222", true)).await.unwrap();
        let service = service_with(Arc::new(storage));

        let access = JwtUtils::generate_access_token(active.id, UserType::STUDENT).unwrap();
        let resp = handle_refresh_token(&service, &refresh_request(&access))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let bare = actix_test::TestRequest::default().to_http_request();
        let resp = handle_refresh_token(&service, &bare).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
