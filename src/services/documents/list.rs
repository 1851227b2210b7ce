use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DocumentService;
use crate::models::documents::entities::DocumentType;
use crate::models::documents::requests::{DocumentListParams, DocumentListQuery};
use crate::models::documents::responses::DocumentListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response};

/// 把 HTTP 查询参数转换为存储层查询，空字符串视为未提供
pub(crate) fn to_query(params: DocumentListParams) -> Result<DocumentListQuery, String> {
    let (page, size) = params.pagination.normalized();
    let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let document_type = match non_empty(params.document_type) {
        None => None,
        Some(raw) => Some(raw.parse::<DocumentType>()?),
    };

    Ok(DocumentListQuery {
        page,
        size,
        category: non_empty(params.category),
        document_type,
        search: non_empty(params.search),
    })
}

pub async fn handle_list_documents(
    service: &DocumentService,
    request: &HttpRequest,
    params: DocumentListParams,
) -> ActixResult<HttpResponse> {
    let query = match to_query(params) {
        Ok(query) => query,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };
    let storage = service.get_storage(request)?;

    let page = match storage.list_documents_with_pagination(query).await {
        Ok(page) => page,
        Err(e) => return Ok(error_response(&e)),
    };
    let categories = match storage.list_document_categories().await {
        Ok(list) => list,
        Err(e) => return Ok(error_response(&e)),
    };
    let document_types = match storage.list_document_types().await {
        Ok(list) => list,
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DocumentListResponse {
            items: page.items,
            pagination: page.pagination,
            categories,
            document_types,
        },
        "Documents retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;

    fn params(document_type: Option<&str>, search: Option<&str>) -> DocumentListParams {
        DocumentListParams {
            pagination: PaginationQuery { page: 0, size: 500 },
            category: Some("   ".to_string()),
            document_type: document_type.map(String::from),
            search: search.map(String::from),
        }
    }

    #[test]
    fn test_to_query_normalizes() {
        let q = to_query(params(Some("Tesis"), Some("  radar "))).unwrap();
        assert_eq!((q.page, q.size), (1, 100));
        assert!(q.category.is_none());
        assert_eq!(q.document_type, Some(DocumentType::Thesis));
        assert_eq!(q.search.as_deref(), Some("radar"));

        let q = to_query(params(Some(""), None)).unwrap();
        assert!(q.document_type.is_none());
    }

    #[test]
    fn test_to_query_rejects_unknown_type() {
        assert!(to_query(params(Some("revista"), None)).is_err());
    }
}
