//! 教学评价实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub professor_id: i64,
    pub subject_mastery: i32,
    pub explanation_clarity: i32,
    pub punctuality: i32,
    pub availability: i32,
    pub methodology: i32,
    pub overall: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub positive_aspects: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub improvement_aspects: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub general_comments: Option<String>,
    pub recommendation: String,
    pub semester: i32,
    pub academic_period: String,
    pub evaluated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::ProfessorId",
        to = "super::professors::Column::Id"
    )]
    Professor,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_evaluation(self) -> crate::models::evaluations::entities::Evaluation {
        use crate::models::evaluations::entities::{Evaluation, Ratings, Recommendation};

        let ratings = Ratings {
            subject_mastery: self.subject_mastery,
            explanation_clarity: self.explanation_clarity,
            punctuality: self.punctuality,
            availability: self.availability,
            methodology: self.methodology,
            overall: self.overall,
        };

        Evaluation {
            id: self.id,
            student_id: self.student_id,
            professor_id: self.professor_id,
            ratings,
            average: ratings.average(),
            positive_aspects: self.positive_aspects,
            improvement_aspects: self.improvement_aspects,
            general_comments: self.general_comments,
            recommendation: self
                .recommendation
                .parse::<Recommendation>()
                .unwrap_or(Recommendation::Maybe),
            semester: self.semester,
            academic_period: self.academic_period,
            evaluated_at: super::timestamp_to_datetime(self.evaluated_at),
        }
    }
}
