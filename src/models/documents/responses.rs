use super::entities::Document;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 文档列表响应，附带可用的筛选项
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "document.ts")]
pub struct DocumentListResponse {
    pub items: Vec<Document>,
    pub pagination: PaginationInfo,
    pub categories: Vec<String>,
    pub document_types: Vec<String>,
}
