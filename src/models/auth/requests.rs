use super::entities::UserType;
use serde::Deserialize;
use ts_rs::TS;

// 登录请求（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}
