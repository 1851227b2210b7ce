//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod documents;
mod evaluations;
mod professors;
mod qr_tokens;
mod students;
mod videos;

#[cfg(test)]
pub(crate) use professors::tests::professor_request;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按配置连接数据库并运行迁移
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;
        Self::connect(&db_url, config, true).await
    }

    /// 连接已有数据库：SQLite 文件不存在时报错，不运行迁移
    pub async fn open_existing() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;
        Self::connect(&db_url, config, false).await
    }

    async fn connect(db_url: &str, config: &AppConfig, prepare: bool) -> Result<Self> {
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(db_url, config, prepare).await?
        } else {
            Self::connect_generic(db_url, config).await?
        };

        if prepare {
            Self::migrate(&db).await?;
            info!("SeaORM storage ready, database: {}", db_url);
        } else {
            info!("SeaORM storage opened without migrations, database: {}", db_url);
        }

        Ok(Self { db })
    }

    /// 单连接的内存 SQLite，供测试使用
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("内存数据库连接失败: {e}")))?;
        Self::migrate(&db).await?;
        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(
        url: &str,
        config: &AppConfig,
        create_if_missing: bool,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(create_if_missing)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 插入失败时区分唯一约束冲突与其他数据库错误
pub(crate) fn insert_error(err: DbErr, what: &str) -> PortalError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            PortalError::conflict(format!("{what} already exists: {detail}"))
        }
        _ => PortalError::database_operation(format!("创建{what}失败: {err}")),
    }
}

/// 查询类错误
pub(crate) fn query_error(what: &str) -> impl FnOnce(DbErr) -> PortalError + '_ {
    move |e| PortalError::database_operation(format!("查询{what}失败: {e}"))
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_student_by_email_impl(email).await
    }

    async fn get_student_by_cedula(&self, cedula: &str) -> Result<Option<Student>> {
        self.get_student_by_cedula_impl(cedula).await
    }

    async fn find_student_by_email_or_cedula(
        &self,
        email: &str,
        cedula: &str,
    ) -> Result<Option<Student>> {
        self.find_student_by_email_or_cedula_impl(email, cedula)
            .await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    // 教师模块
    async fn create_professor(&self, professor: CreateProfessorRequest) -> Result<Professor> {
        self.create_professor_impl(professor).await
    }

    async fn get_professor_by_id(&self, id: i64) -> Result<Option<Professor>> {
        self.get_professor_by_id_impl(id).await
    }

    async fn get_professor_by_email(&self, email: &str) -> Result<Option<Professor>> {
        self.get_professor_by_email_impl(email).await
    }

    async fn find_professor_by_email_or_cedula(
        &self,
        email: &str,
        cedula: &str,
    ) -> Result<Option<Professor>> {
        self.find_professor_by_email_or_cedula_impl(email, cedula)
            .await
    }

    async fn list_active_professors(&self) -> Result<Vec<Professor>> {
        self.list_active_professors_impl().await
    }

    async fn count_professors(&self) -> Result<u64> {
        self.count_professors_impl().await
    }

    // 二维码令牌模块
    async fn get_active_qr_token(&self, professor_id: i64) -> Result<Option<QrToken>> {
        self.get_active_qr_token_impl(professor_id).await
    }

    async fn create_qr_token(
        &self,
        professor_id: i64,
        token: &str,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<QrToken> {
        self.create_qr_token_impl(professor_id, token, expires_at)
            .await
    }

    async fn deactivate_qr_tokens(&self, professor_id: i64) -> Result<u64> {
        self.deactivate_qr_tokens_impl(professor_id).await
    }

    async fn rotate_qr_token(
        &self,
        professor_id: i64,
        token: &str,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<QrToken> {
        self.rotate_qr_token_impl(professor_id, token, expires_at)
            .await
    }

    async fn get_valid_qr_token(&self, token: &str) -> Result<Option<QrToken>> {
        self.get_valid_qr_token_impl(token).await
    }

    async fn increment_qr_token_uses(&self, id: i64) -> Result<bool> {
        self.increment_qr_token_uses_impl(id).await
    }

    // 评价模块
    async fn create_evaluation(&self, evaluation: CreateEvaluationRequest) -> Result<Evaluation> {
        self.create_evaluation_impl(evaluation).await
    }

    async fn find_evaluation(
        &self,
        student_id: i64,
        professor_id: i64,
        academic_period: &str,
    ) -> Result<Option<Evaluation>> {
        self.find_evaluation_impl(student_id, professor_id, academic_period)
            .await
    }

    async fn list_recent_evaluations(
        &self,
        professor_id: i64,
        limit: u64,
    ) -> Result<Vec<Evaluation>> {
        self.list_recent_evaluations_impl(professor_id, limit).await
    }

    async fn get_evaluation_stats(&self, professor_id: i64) -> Result<EvaluationStats> {
        self.get_evaluation_stats_impl(professor_id).await
    }

    // 视频模块
    async fn create_video(&self, video: CreateVideoRequest) -> Result<Video> {
        self.create_video_impl(video).await
    }

    async fn list_active_videos(&self) -> Result<Vec<Video>> {
        self.list_active_videos_impl().await
    }

    async fn list_professor_videos(&self, professor_id: i64) -> Result<Vec<Video>> {
        self.list_professor_videos_impl(professor_id).await
    }

    // 文档库模块
    async fn create_document(&self, document: CreateDocumentRequest) -> Result<Document> {
        self.create_document_impl(document).await
    }

    async fn get_document_by_id(&self, id: i64) -> Result<Option<Document>> {
        self.get_document_by_id_impl(id).await
    }

    async fn document_exists_by_pdf_file(&self, pdf_file: &str) -> Result<bool> {
        self.document_exists_by_pdf_file_impl(pdf_file).await
    }

    async fn list_documents_with_pagination(
        &self,
        query: DocumentListQuery,
    ) -> Result<PaginatedResponse<Document>> {
        self.list_documents_with_pagination_impl(query).await
    }

    async fn list_document_categories(&self) -> Result<Vec<String>> {
        self.list_document_categories_impl().await
    }

    async fn list_document_types(&self) -> Result<Vec<String>> {
        self.list_document_types_impl().await
    }

    async fn increment_document_downloads(&self, id: i64) -> Result<bool> {
        self.increment_document_downloads_impl(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_without_prepare_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.db");
        let url = format!("sqlite://{}", path.display());
        let config = AppConfig::get();

        assert!(SeaOrmStorage::connect(&url, config, false).await.is_err());
        assert!(!path.exists());

        SeaOrmStorage::connect(&url, config, true).await.unwrap();
        assert!(path.exists());
        let reopened = SeaOrmStorage::connect(&url, config, false).await.unwrap();
        assert_eq!(reopened.list_active_professors_impl().await.unwrap().len(), 0);
    }
}
