/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，根据令牌中的 `role` 声明到学生表或教师表中
 * 查找账户，并把 [`AuthUser`] 放入请求扩展，供后续中间件与处理函数使用。
 *
 * ```rust,ignore
 * web::scope("/professors")
 *     .wrap(RequireRole::new(UserType::Professor))
 *     .wrap(RequireJWT)
 *     .route("/me/panel", web::get().to(panel_handler))
 * ```
 *
 * 查到的账户会以令牌为键写入对象缓存，过期时间取 `cache.default_ttl`。
 */

use crate::cache::{ObjectCache, ObjectCacheExt};
use crate::models::ErrorCode;
use crate::models::auth::entities::{AuthUser, UserType};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

fn cache_key(token: &str) -> String {
    format!("auth_user:{token}")
}

/// 按账户类型从存储中加载账户
pub(crate) async fn load_auth_user(
    storage: &dyn Storage,
    user_type: UserType,
    id: i64,
) -> Result<Option<AuthUser>, String> {
    let user = match user_type {
        UserType::Student => storage
            .get_student_by_id(id)
            .await
            .map_err(|e| format!("Failed to load student: {e}"))?
            .map(AuthUser::Student),
        UserType::Professor => storage
            .get_professor_by_id(id)
            .await
            .map_err(|e| format!("Failed to load professor: {e}"))?
            .map(AuthUser::Professor),
    };
    Ok(user)
}

// 提取并验证 JWT access token
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<AuthUser, String> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());

    if let Some(cache) = &cache
        && let Some(user) = cache.get_json::<AuthUser>(&cache_key(token)).await
    {
        return Ok(user);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| "Storage not configured".to_string())?;

    let user_type = claims
        .user_type()
        .ok_or_else(|| "Invalid role in JWT".to_string())?;
    let account_id = claims
        .account_id()
        .ok_or_else(|| "Invalid account ID in JWT".to_string())?;

    let user = load_auth_user(storage.as_ref(), user_type, account_id)
        .await?
        .ok_or_else(|| "Account not found".to_string())?;

    if !user.is_active() {
        return Err("Account is not active".to_string());
    }

    if let Some(cache) = &cache {
        cache.insert_json(cache_key(token), &user, 0).await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!(
                        "JWT authentication successful for {} {}",
                        user.user_type(),
                        user.id()
                    );
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取账户信息
impl RequireJWT {
    /// 从请求扩展中提取当前账户
    pub fn extract_auth_user(req: &actix_web::HttpRequest) -> Option<AuthUser> {
        req.extensions().get::<AuthUser>().cloned()
    }

    /// 从请求扩展中提取账户类型
    pub fn extract_user_type(req: &actix_web::HttpRequest) -> Option<UserType> {
        req.extensions().get::<AuthUser>().map(|u| u.user_type())
    }

    /// 从请求扩展中提取当前教师
    pub fn extract_professor(
        req: &actix_web::HttpRequest,
    ) -> Option<crate::models::professors::entities::Professor> {
        req.extensions()
            .get::<AuthUser>()
            .and_then(|u| u.as_professor().cloned())
    }
}
