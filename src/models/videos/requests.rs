// 创建视频（存储层使用）
#[derive(Debug, Clone, Default)]
pub struct CreateVideoRequest {
    pub professor_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub semester: Option<i32>,
    pub video_file: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
}
