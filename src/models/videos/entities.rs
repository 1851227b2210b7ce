use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课堂视频
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "video.ts")]
pub struct Video {
    pub id: i64,
    pub professor_id: i64,
    /// 仅在课堂列表中填充
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professor_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub semester: Option<i32>,
    pub video_file: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
