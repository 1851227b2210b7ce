use super::{SeaOrmStorage, insert_error, query_error};
use crate::entity::teacher_evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::errors::Result;
use crate::models::evaluations::{
    entities::{Evaluation, EvaluationStats, Ratings, Recommendation},
    requests::CreateEvaluationRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建评价，(学生, 教师, 学期) 唯一
    pub async fn create_evaluation_impl(
        &self,
        req: CreateEvaluationRequest,
    ) -> Result<Evaluation> {
        let r = req.ratings;
        let model = ActiveModel {
            student_id: Set(req.student_id),
            professor_id: Set(req.professor_id),
            subject_mastery: Set(r.subject_mastery),
            explanation_clarity: Set(r.explanation_clarity),
            punctuality: Set(r.punctuality),
            availability: Set(r.availability),
            methodology: Set(r.methodology),
            overall: Set(r.overall),
            positive_aspects: Set(req.positive_aspects),
            improvement_aspects: Set(req.improvement_aspects),
            general_comments: Set(req.general_comments),
            recommendation: Set(req.recommendation.to_string()),
            semester: Set(req.semester),
            academic_period: Set(req.academic_period),
            evaluated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| insert_error(e, "评价"))?;

        Ok(result.into_evaluation())
    }

    pub async fn find_evaluation_impl(
        &self,
        student_id: i64,
        professor_id: i64,
        academic_period: &str,
    ) -> Result<Option<Evaluation>> {
        let result = Evaluations::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ProfessorId.eq(professor_id))
            .filter(Column::AcademicPeriod.eq(academic_period))
            .one(&self.db)
            .await
            .map_err(query_error("评价"))?;

        Ok(result.map(|m| m.into_evaluation()))
    }

    /// 教师最近收到的评价
    pub async fn list_recent_evaluations_impl(
        &self,
        professor_id: i64,
        limit: u64,
    ) -> Result<Vec<Evaluation>> {
        let result = Evaluations::find()
            .filter(Column::ProfessorId.eq(professor_id))
            .order_by_desc(Column::EvaluatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_error("评价列表"))?;

        Ok(result.into_iter().map(|m| m.into_evaluation()).collect())
    }

    /// 只取评分与推荐列做汇总
    pub async fn get_evaluation_stats_impl(&self, professor_id: i64) -> Result<EvaluationStats> {
        let rows = Evaluations::find()
            .filter(Column::ProfessorId.eq(professor_id))
            .select_only()
            .column(Column::SubjectMastery)
            .column(Column::ExplanationClarity)
            .column(Column::Punctuality)
            .column(Column::Availability)
            .column(Column::Methodology)
            .column(Column::Overall)
            .column(Column::Recommendation)
            .into_tuple::<(i32, i32, i32, i32, i32, i32, String)>()
            .all(&self.db)
            .await
            .map_err(query_error("评价统计"))?;

        Ok(EvaluationStats::from_ratings(rows.into_iter().map(
            |(a, b, c, d, e, f, rec)| {
                (
                    Ratings {
                        subject_mastery: a,
                        explanation_clarity: b,
                        punctuality: c,
                        availability: d,
                        methodology: e,
                        overall: f,
                    },
                    rec.parse().unwrap_or(Recommendation::Maybe),
                )
            },
        )))
    }
}
