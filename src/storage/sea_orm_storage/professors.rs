use super::{SeaOrmStorage, insert_error, query_error};
use crate::entity::professors::{ActiveModel, Column, Entity as Professors};
use crate::errors::Result;
use crate::models::professors::{
    entities::{Professor, join_subjects},
    requests::CreateProfessorRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_professor_impl(&self, req: CreateProfessorRequest) -> Result<Professor> {
        let model = ActiveModel {
            cedula: Set(req.cedula),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            phone: Set(req.phone),
            department: Set(req.department),
            subjects: Set(join_subjects(&req.subjects)),
            experience_years: Set(req.experience_years),
            academic_title: Set(req.academic_title),
            password_hash: Set(req.password_hash),
            registered_at: Set(chrono::Utc::now().timestamp()),
            active: Set(req.active),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| insert_error(e, "教师"))?;

        Ok(result.into_professor())
    }

    pub async fn get_professor_by_id_impl(&self, id: i64) -> Result<Option<Professor>> {
        let result = Professors::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error("教师"))?;

        Ok(result.map(|m| m.into_professor()))
    }

    pub async fn get_professor_by_email_impl(&self, email: &str) -> Result<Option<Professor>> {
        let result = Professors::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error("教师"))?;

        Ok(result.map(|m| m.into_professor()))
    }

    pub async fn find_professor_by_email_or_cedula_impl(
        &self,
        email: &str,
        cedula: &str,
    ) -> Result<Option<Professor>> {
        let result = Professors::find()
            .filter(
                Condition::any()
                    .add(Column::Email.eq(email))
                    .add(Column::Cedula.eq(cedula)),
            )
            .one(&self.db)
            .await
            .map_err(query_error("教师"))?;

        Ok(result.map(|m| m.into_professor()))
    }

    pub async fn list_active_professors_impl(&self) -> Result<Vec<Professor>> {
        let result = Professors::find()
            .filter(Column::Active.eq(true))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error("教师列表"))?;

        Ok(result.into_iter().map(|m| m.into_professor()).collect())
    }

    pub async fn count_professors_impl(&self) -> Result<u64> {
        Professors::find()
            .count(&self.db)
            .await
            .map_err(query_error("教师总数"))
    }
}
