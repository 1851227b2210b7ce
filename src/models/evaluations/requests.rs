use super::entities::{Ratings, Recommendation};
use serde::Deserialize;
use ts_rs::TS;

// 提交评价请求（公开表单）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct SubmitEvaluationRequest {
    pub token: String,
    pub student_cedula: String,
    pub student_name: String,
    pub semester: i32,
    /// 学期编号，格式 YYYY-N
    pub academic_period: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub ratings: Ratings,
    pub positive_aspects: Option<String>,
    pub improvement_aspects: Option<String>,
    pub general_comments: Option<String>,
    pub recommendation: Recommendation,
}

// 创建评价（存储层使用）
#[derive(Debug, Clone)]
pub struct CreateEvaluationRequest {
    pub student_id: i64,
    pub professor_id: i64,
    pub ratings: Ratings,
    pub positive_aspects: Option<String>,
    pub improvement_aspects: Option<String>,
    pub general_comments: Option<String>,
    pub recommendation: Recommendation,
    pub semester: i32,
    pub academic_period: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_ratings_are_parsed() {
        let req: SubmitEvaluationRequest = serde_json::from_str(
            r#"{
                "token": "t", "student_cedula": "V-123", "student_name": "Luis Pérez",
                "semester": 3, "academic_period": "2025-1",
                "subject_mastery": 5, "explanation_clarity": 4, "punctuality": 5,
                "availability": 3, "methodology": 4, "overall": 5,
                "recommendation": "si"
            }"#,
        )
        .unwrap();
        assert_eq!(req.ratings.availability, 3);
        assert_eq!(req.recommendation, Recommendation::Yes);
        assert!(req.general_comments.is_none());
    }
}
