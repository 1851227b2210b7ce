//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    PdfParse("E013", "PDF Parse Error"),
    Conflict("E014", "Resource Conflict"),
}

impl PortalError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl PortalError {
    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            PortalError::Validation(_) | PortalError::DateParse(_) | PortalError::PdfParse(_) => {
                StatusCode::BAD_REQUEST
            }
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::Conflict(_) => StatusCode::CONFLICT,
            PortalError::Authentication(_) => StatusCode::UNAUTHORIZED,
            PortalError::Authorization(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的业务错误码
    pub fn api_code(&self) -> crate::models::ErrorCode {
        use crate::models::ErrorCode;
        match self {
            PortalError::Validation(_) | PortalError::DateParse(_) | PortalError::PdfParse(_) => {
                ErrorCode::BadRequest
            }
            PortalError::NotFound(_) => ErrorCode::NotFound,
            PortalError::Conflict(_) => ErrorCode::Conflict,
            PortalError::Authentication(_) => ErrorCode::Unauthorized,
            PortalError::Authorization(_) => ErrorCode::Forbidden,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 返回给客户端的消息，服务端内部错误不暴露细节
    pub fn public_message(&self) -> String {
        if self.http_status().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.message().to_string()
        }
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

impl From<lopdf::Error> for PortalError {
    fn from(err: lopdf::Error) -> Self {
        PortalError::PdfParse(err.to_string())
    }
}

impl From<walkdir::Error> for PortalError {
    fn from(err: walkdir::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PortalError::cache_connection("test").code(), "E001");
        assert_eq!(PortalError::database_config("test").code(), "E003");
        assert_eq!(PortalError::validation("test").code(), "E007");
        assert_eq!(PortalError::authentication("test").code(), "E011");
        assert_eq!(PortalError::pdf_parse("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PortalError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            PortalError::conflict("test").error_type(),
            "Resource Conflict"
        );
    }

    #[test]
    fn test_error_message() {
        let err = PortalError::validation("Rating out of range");
        assert_eq!(err.message(), "Rating out of range");
    }

    #[test]
    fn test_format_simple() {
        let err = PortalError::not_found("Document 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Document 42"));
    }

    #[test]
    fn test_http_mapping() {
        use actix_web::http::StatusCode;
        assert_eq!(
            PortalError::conflict("dup").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            PortalError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        let db = PortalError::database_operation("UNIQUE constraint failed");
        assert_eq!(db.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.public_message(), "Internal server error");
        assert_eq!(PortalError::validation("bad").public_message(), "bad");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.pdf");
        let err: PortalError = io.into();
        assert_eq!(err.code(), "E006");
        assert!(err.message().contains("missing.pdf"));
    }
}
