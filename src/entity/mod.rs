//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod class_videos;
pub mod professor_qr_tokens;
pub mod professors;
pub mod repository_documents;
pub mod students;
pub mod teacher_evaluations;

/// 将秒级时间戳转换为 UTC 时间
pub(crate) fn timestamp_to_datetime(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

/// 解析 ISO 日期字符串，格式错误时返回 None
pub(crate) fn parse_iso_date(value: Option<String>) -> Option<chrono::NaiveDate> {
    value.and_then(|s| chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}
