//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "professors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub cedula: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub subjects: Option<String>,
    pub experience_years: Option<i32>,
    pub academic_title: Option<String>,
    pub password_hash: String,
    pub registered_at: i64,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::teacher_evaluations::Entity")]
    Evaluations,
    #[sea_orm(has_many = "super::class_videos::Entity")]
    ClassVideos,
    #[sea_orm(has_many = "super::professor_qr_tokens::Entity")]
    QrTokens,
    #[sea_orm(has_many = "super::repository_documents::Entity")]
    Documents,
}

impl Related<super::teacher_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl Related<super::class_videos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassVideos.def()
    }
}

impl Related<super::professor_qr_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QrTokens.def()
    }
}

impl Related<super::repository_documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_professor(self) -> crate::models::professors::entities::Professor {
        use crate::models::professors::entities::{Professor, split_subjects};

        Professor {
            id: self.id,
            cedula: self.cedula,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            department: self.department,
            subjects: split_subjects(self.subjects.as_deref()),
            experience_years: self.experience_years,
            academic_title: self.academic_title,
            password_hash: self.password_hash,
            registered_at: super::timestamp_to_datetime(self.registered_at),
            active: self.active,
        }
    }
}
