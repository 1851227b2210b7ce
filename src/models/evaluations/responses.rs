use crate::models::professors::entities::ProfessorPublicProfile;
use serde::Serialize;
use ts_rs::TS;

// 打开评价页面的响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct EvaluationFormResponse {
    pub professor: ProfessorPublicProfile,
    pub min_rating: i32,
    pub max_rating: i32,
}

// 提交评价成功的响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct EvaluationSubmittedResponse {
    pub evaluation_id: i64,
    pub professor_name: String,
    pub average: f64,
}
