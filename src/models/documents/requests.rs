use super::entities::DocumentType;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 文档列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "document.ts")]
pub struct DocumentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub category: Option<String>,
    pub document_type: Option<String>,
    pub search: Option<String>,
}

// 文档列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct DocumentListQuery {
    pub page: u64,
    pub size: u64,
    pub category: Option<String>,
    pub document_type: Option<DocumentType>,
    pub search: Option<String>,
}

// 创建文档（存储层使用）
#[derive(Debug, Clone)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub description: Option<String>,
    pub author_id: i64,
    pub document_type: DocumentType,
    pub category: String,
    pub pdf_file: Option<String>,
    pub external_url: Option<String>,
    pub isbn: Option<String>,
    pub publication_date: Option<chrono::NaiveDate>,
    pub keywords: Vec<String>,
}
