/*!
 * 速率限制中间件
 *
 * 固定窗口计数：每个限制键在窗口期内最多允许 `max_requests` 次请求，超出返回 429。
 * 已认证的请求按账户计数，匿名请求（公开评价表单、聊天机器人）按客户端 IP 计数。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login_handler))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::auth::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};

/// 全局计数表
/// 键: 前缀:账户或IP，值: (窗口开始时间, 计数)
static RATE_LIMIT_CACHE: Lazy<Cache<String, (Instant, u32)>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 注册：3次/分钟/IP
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }

    /// 刷新令牌：10次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 公开评价（打开与提交）：10次/分钟/IP，防止枚举令牌与刷票
    pub fn evaluation() -> Self {
        Self::new(10, 60).with_prefix("evaluation")
    }

    /// 上传视频或文档：10次/分钟/账户
    pub fn file_upload() -> Self {
        Self::new(10, 60).with_prefix("upload")
    }

    /// 聊天机器人：30次/分钟/IP
    pub fn chatbot() -> Self {
        Self::new(30, 60).with_prefix("chat")
    }

    /// 意见箱：5次/10分钟/IP
    pub fn suggestion() -> Self {
        Self::new(5, 600).with_prefix("suggestion")
    }
}

/// 从请求中提取客户端 IP
///
/// 部署在反向代理之后时，需要代理正确设置 X-Forwarded-For / X-Real-IP。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    // realip_remote_addr 可能带端口
    if let Some(ref addr) = connection_ip
        && let Ok(sock) = addr.parse::<std::net::SocketAddr>()
    {
        return sock.ip().to_string();
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<std::net::IpAddr>().is_ok()
}

fn rate_limit_key(req: &ServiceRequest) -> String {
    // connection_info 会写入扩展，先释放对扩展的借用
    let account = req
        .extensions()
        .get::<AuthUser>()
        .map(|user| format!("{}:{}", user.user_type(), user.id()));
    account.unwrap_or_else(|| format!("ip:{}", extract_client_ip(req)))
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

/// 计数并判断是否放行，返回 Err(剩余等待秒数) 表示超限
async fn hit(cache_key: String, max_requests: u32, window: Duration) -> Result<u32, u64> {
    let now = Instant::now();
    let (window_start, count) = match RATE_LIMIT_CACHE.get(&cache_key).await {
        Some((start, count)) if now.duration_since(start) < window => (start, count),
        _ => (now, 0),
    };

    if count >= max_requests {
        let elapsed = now.duration_since(window_start);
        return Err(window.saturating_sub(elapsed).as_secs().max(1));
    }

    RATE_LIMIT_CACHE
        .insert(cache_key, (window_start, count + 1))
        .await;
    Ok(max_requests - count - 1)
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    config: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let config = self.config.clone();

        Box::pin(async move {
            let cache_key = format!("{}:{}", config.key_prefix, rate_limit_key(&req));

            match hit(
                cache_key.clone(),
                config.max_requests,
                Duration::from_secs(config.window_secs),
            )
            .await
            {
                Ok(_remaining) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(retry_after) => {
                    warn!(
                        "Rate limit exceeded for key: {} (limit: {}/{}s)",
                        cache_key, config.max_requests, config.window_secs
                    );
                    Ok(req.into_response(
                        create_rate_limit_response(retry_after).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        let suggestion = RateLimit::suggestion();
        assert_eq!(suggestion.window_secs, 600);
    }

    #[actix_web::test]
    async fn test_requests_over_limit_are_rejected() {
        let app = actix_test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new(2, 60).with_prefix("test_over_limit"))
                    .route(web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let addr: std::net::SocketAddr = "10.1.2.3:4000".parse().unwrap();
        for _ in 0..2 {
            let req = actix_test::TestRequest::get()
                .uri("/limited")
                .peer_addr(addr)
                .to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = actix_test::TestRequest::get()
            .uri("/limited")
            .peer_addr(addr)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key("Retry-After"));

        // 其他 IP 不受影响
        let req = actix_test::TestRequest::get()
            .uri("/limited")
            .peer_addr("10.9.9.9:4000".parse().unwrap())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
