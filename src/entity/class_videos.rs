//! 课堂视频实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "class_videos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub professor_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub subject: String,
    pub semester: Option<i32>,
    pub video_file: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub uploaded_at: i64,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::ProfessorId",
        to = "super::professors::Column::Id"
    )]
    Professor,
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_video(self) -> crate::models::videos::entities::Video {
        use crate::models::videos::entities::Video;

        Video {
            id: self.id,
            professor_id: self.professor_id,
            professor_name: None,
            title: self.title,
            description: self.description,
            subject: self.subject,
            semester: self.semester,
            video_file: self.video_file,
            video_url: self.video_url,
            duration_minutes: self.duration_minutes,
            uploaded_at: super::timestamp_to_datetime(self.uploaded_at),
        }
    }
}
