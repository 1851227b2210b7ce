pub mod auth;
pub mod chatbot;
pub mod common;
pub mod documents;
pub mod evaluations;
pub mod ingestion;
pub mod professors;
pub mod qr_tokens;
pub mod students;
pub mod suggestions;
pub mod system;
pub mod videos;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;

/// 程序启动时间，供健康检查计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 账户；3xxx 评价；4xxx 文件；5xxx 服务器；6xxx 文档库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    Conflict = 1004,
    RateLimitExceeded = 1005,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserEmailInvalid = 2002,
    UserPasswordInvalid = 2003,
    UserAlreadyExists = 2004,
    UserNotFound = 2005,
    AccountInactive = 2006,

    QrTokenInvalid = 3000,
    EvaluationInvalid = 3001,
    EvaluationAlreadySubmitted = 3002,

    FileUploadFailed = 4000,
    FileTypeNotAllowed = 4001,
    FileSizeExceeded = 4002,
    FileNotFound = 4003,
    MultifileUploadNotAllowed = 4004,

    InternalServerError = 5000,

    DocumentNotFound = 6000,
    DocumentCreationFailed = 6001,
    VideoCreationFailed = 6002,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Conflict as i32, 1004);
        assert_eq!(ErrorCode::EvaluationAlreadySubmitted as i32, 3002);
        assert_eq!(ErrorCode::DocumentNotFound as i32, 6000);
    }

    #[test]
    fn test_api_response_envelope() {
        let resp = ApiResponse::error_empty(ErrorCode::NotFound, "missing");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 1003);
        assert_eq!(json["message"], "missing");
        assert!(json.get("data").is_none());
    }
}
