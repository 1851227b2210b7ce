use std::sync::Arc;

use crate::models::{
    PaginatedResponse,
    documents::{
        entities::Document,
        requests::{CreateDocumentRequest, DocumentListQuery},
    },
    evaluations::{
        entities::{Evaluation, EvaluationStats},
        requests::CreateEvaluationRequest,
    },
    professors::{entities::Professor, requests::CreateProfessorRequest},
    qr_tokens::entities::QrToken,
    students::{entities::Student, requests::CreateStudentRequest},
    videos::{entities::Video, requests::CreateVideoRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生
    // 创建学生，邮箱或身份证号重复时返回 Conflict
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    async fn get_student_by_cedula(&self, cedula: &str) -> Result<Option<Student>>;
    // 邮箱或身份证号任一匹配
    async fn find_student_by_email_or_cedula(
        &self,
        email: &str,
        cedula: &str,
    ) -> Result<Option<Student>>;
    async fn count_students(&self) -> Result<u64>;

    /// 教师
    // 创建教师，邮箱或身份证号重复时返回 Conflict
    async fn create_professor(&self, professor: CreateProfessorRequest) -> Result<Professor>;
    async fn get_professor_by_id(&self, id: i64) -> Result<Option<Professor>>;
    async fn get_professor_by_email(&self, email: &str) -> Result<Option<Professor>>;
    async fn find_professor_by_email_or_cedula(
        &self,
        email: &str,
        cedula: &str,
    ) -> Result<Option<Professor>>;
    // 所有激活的教师（用于作者匹配）
    async fn list_active_professors(&self) -> Result<Vec<Professor>>;
    async fn count_professors(&self) -> Result<u64>;

    /// 评价二维码令牌
    // 教师当前激活的令牌（可能已过期）
    async fn get_active_qr_token(&self, professor_id: i64) -> Result<Option<QrToken>>;
    async fn create_qr_token(
        &self,
        professor_id: i64,
        token: &str,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<QrToken>;
    // 停用教师的全部令牌，返回停用数量
    async fn deactivate_qr_tokens(&self, professor_id: i64) -> Result<u64>;
    // 在同一事务中停用旧令牌并创建新令牌
    async fn rotate_qr_token(
        &self,
        professor_id: i64,
        token: &str,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<QrToken>;
    // 激活且未过期的令牌
    async fn get_valid_qr_token(&self, token: &str) -> Result<Option<QrToken>>;
    async fn increment_qr_token_uses(&self, id: i64) -> Result<bool>;

    /// 教学评价
    // 同一学生、教师、学期重复提交时返回 Conflict
    async fn create_evaluation(&self, evaluation: CreateEvaluationRequest) -> Result<Evaluation>;
    async fn find_evaluation(
        &self,
        student_id: i64,
        professor_id: i64,
        academic_period: &str,
    ) -> Result<Option<Evaluation>>;
    async fn list_recent_evaluations(
        &self,
        professor_id: i64,
        limit: u64,
    ) -> Result<Vec<Evaluation>>;
    async fn get_evaluation_stats(&self, professor_id: i64) -> Result<EvaluationStats>;

    /// 课堂视频
    async fn create_video(&self, video: CreateVideoRequest) -> Result<Video>;
    // 所有激活的视频，附带教师姓名，最新在前
    async fn list_active_videos(&self) -> Result<Vec<Video>>;
    async fn list_professor_videos(&self, professor_id: i64) -> Result<Vec<Video>>;

    /// 文档库
    async fn create_document(&self, document: CreateDocumentRequest) -> Result<Document>;
    async fn get_document_by_id(&self, id: i64) -> Result<Option<Document>>;
    // 导入流程的幂等键
    async fn document_exists_by_pdf_file(&self, pdf_file: &str) -> Result<bool>;
    async fn list_documents_with_pagination(
        &self,
        query: DocumentListQuery,
    ) -> Result<PaginatedResponse<Document>>;
    async fn list_document_categories(&self) -> Result<Vec<String>>;
    async fn list_document_types(&self) -> Result<Vec<String>>;
    async fn increment_document_downloads(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

/// 打开已有数据库，不建库也不迁移，供只读分析使用
pub async fn open_existing_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::open_existing().await?;
    Ok(Arc::new(storage))
}
