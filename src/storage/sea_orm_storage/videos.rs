use super::{SeaOrmStorage, insert_error, query_error};
use crate::entity::class_videos::{ActiveModel, Column, Entity as Videos};
use crate::entity::professors::Entity as Professors;
use crate::errors::Result;
use crate::models::videos::{entities::Video, requests::CreateVideoRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_video_impl(&self, req: CreateVideoRequest) -> Result<Video> {
        let model = ActiveModel {
            professor_id: Set(req.professor_id),
            title: Set(req.title),
            description: Set(req.description),
            subject: Set(req.subject),
            semester: Set(req.semester),
            video_file: Set(req.video_file),
            video_url: Set(req.video_url),
            duration_minutes: Set(req.duration_minutes),
            uploaded_at: Set(chrono::Utc::now().timestamp()),
            active: Set(true),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| insert_error(e, "视频"))?;

        Ok(result.into_video())
    }

    /// 课堂列表，连同教师姓名一起取出
    pub async fn list_active_videos_impl(&self) -> Result<Vec<Video>> {
        let rows = Videos::find()
            .filter(Column::Active.eq(true))
            .find_also_related(Professors)
            .order_by_desc(Column::UploadedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error("视频列表"))?;

        Ok(rows
            .into_iter()
            .map(|(video, professor)| {
                let mut v = video.into_video();
                v.professor_name = professor.map(|p| format!("{} {}", p.first_name, p.last_name));
                v
            })
            .collect())
    }

    pub async fn list_professor_videos_impl(&self, professor_id: i64) -> Result<Vec<Video>> {
        let rows = Videos::find()
            .filter(Column::ProfessorId.eq(professor_id))
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::UploadedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error("视频列表"))?;

        Ok(rows.into_iter().map(|m| m.into_video()).collect())
    }
}
