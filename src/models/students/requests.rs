use serde::Deserialize;
use ts_rs::TS;

// 学生注册请求（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct RegisterStudentRequest {
    pub cedula: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// YYYY-MM-DD
    pub birth_date: Option<String>,
    pub address: Option<String>,
    pub semester: i32,
    pub password: String,
}

// 创建学生（存储层使用，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateStudentRequest {
    pub cedula: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<chrono::NaiveDate>,
    pub address: Option<String>,
    pub semester: i32,
    pub password_hash: String,
    pub active: bool,
}
