use serde::Serialize;
use ts_rs::TS;

// 公开的系统信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct SystemInfoResponse {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: i64,
    pub students: u64,
    pub professors: u64,
    pub max_document_size: usize,
    pub max_video_size: usize,
    pub document_types: Vec<String>,
    pub video_types: Vec<String>,
}
