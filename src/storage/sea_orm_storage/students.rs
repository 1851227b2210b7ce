use super::{SeaOrmStorage, insert_error, query_error};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::Result;
use crate::models::students::{entities::Student, requests::CreateStudentRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let model = ActiveModel {
            cedula: Set(req.cedula),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            phone: Set(req.phone),
            birth_date: Set(req.birth_date.map(|d| d.format("%Y-%m-%d").to_string())),
            address: Set(req.address),
            semester: Set(req.semester),
            password_hash: Set(req.password_hash),
            registered_at: Set(chrono::Utc::now().timestamp()),
            active: Set(req.active),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| insert_error(e, "学生"))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error("学生"))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error("学生"))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_cedula_impl(&self, cedula: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Cedula.eq(cedula))
            .one(&self.db)
            .await
            .map_err(query_error("学生"))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn find_student_by_email_or_cedula_impl(
        &self,
        email: &str,
        cedula: &str,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(
                Condition::any()
                    .add(Column::Email.eq(email))
                    .add(Column::Cedula.eq(cedula)),
            )
            .one(&self.db)
            .await
            .map_err(query_error("学生"))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn count_students_impl(&self) -> Result<u64> {
        Students::find()
            .count(&self.db)
            .await
            .map_err(query_error("学生总数"))
    }
}
