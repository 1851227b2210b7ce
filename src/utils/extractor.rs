//! 路径参数提取器
//!
//! 在进入处理函数之前校验路径中的 ID 与令牌，非法输入直接返回 400。

use crate::models::{ApiResponse, ErrorCode};
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

fn bad_request(message: &str) -> actix_web::Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

/// 路径中的 `{id}`，必须为正整数
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|id| *id > 0);
        ready(match parsed {
            Some(id) => Ok(SafeIDI64(id)),
            None => Err(bad_request("Invalid id in path")),
        })
    }
}

/// 路径中的 `{token}`，评价二维码令牌（UUID 格式）
#[derive(Debug, Clone)]
pub struct SafeQrToken(pub String);

impl FromRequest for SafeQrToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("token")
            .and_then(|raw| uuid::Uuid::parse_str(raw).ok());
        ready(match parsed {
            Some(token) => Ok(SafeQrToken(token.to_string())),
            None => Err(bad_request("Invalid evaluation token")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_safe_id() {
        let req = TestRequest::default().param("id", "42").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);

        for bad in ["0", "-1", "abc"] {
            let req = TestRequest::default().param("id", bad).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err());
        }
    }

    #[actix_web::test]
    async fn test_safe_token() {
        let token = uuid::Uuid::new_v4().to_string();
        let req = TestRequest::default()
            .param("token", token.clone())
            .to_http_request();
        assert_eq!(SafeQrToken::extract(&req).await.unwrap().0, token);

        let req = TestRequest::default()
            .param("token", "not-a-uuid")
            .to_http_request();
        assert!(SafeQrToken::extract(&req).await.is_err());
    }
}
