use super::entities::Professor;
use crate::models::evaluations::entities::{Evaluation, EvaluationStats};
use crate::models::qr_tokens::entities::QrToken;
use crate::models::videos::entities::Video;
use serde::Serialize;
use ts_rs::TS;

// 当前二维码令牌及其公开评价地址
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "professor.ts")]
pub struct QrTokenResponse {
    pub token: QrToken,
    pub evaluation_url: String,
}

// 教师面板
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "professor.ts")]
pub struct ProfessorPanelResponse {
    pub professor: Professor,
    pub qr: QrTokenResponse,
    pub videos: Vec<Video>,
    pub recent_evaluations: Vec<Evaluation>,
    pub stats: EvaluationStats,
}
