use super::{SeaOrmStorage, insert_error, query_error};
use crate::entity::repository_documents::{ActiveModel, Column, Entity as Documents};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse, PaginationInfo,
    documents::{
        entities::Document,
        requests::{CreateDocumentRequest, DocumentListQuery},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, ExprTrait, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_document_impl(&self, req: CreateDocumentRequest) -> Result<Document> {
        let keywords = if req.keywords.is_empty() {
            None
        } else {
            Some(req.keywords.join(", "))
        };

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            author_id: Set(req.author_id),
            document_type: Set(req.document_type.to_string()),
            category: Set(req.category),
            pdf_file: Set(req.pdf_file),
            external_url: Set(req.external_url),
            isbn: Set(req.isbn),
            publication_date: Set(req
                .publication_date
                .map(|d| d.format("%Y-%m-%d").to_string())),
            uploaded_at: Set(chrono::Utc::now().timestamp()),
            downloads: Set(0),
            active: Set(true),
            keywords: Set(keywords),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| insert_error(e, "文档"))?;

        Ok(result.into_document())
    }

    pub async fn get_document_by_id_impl(&self, id: i64) -> Result<Option<Document>> {
        let result = Documents::find_by_id(id)
            .filter(Column::Active.eq(true))
            .one(&self.db)
            .await
            .map_err(query_error("文档"))?;

        Ok(result.map(|m| m.into_document()))
    }

    pub async fn document_exists_by_pdf_file_impl(&self, pdf_file: &str) -> Result<bool> {
        let count = Documents::find()
            .filter(Column::PdfFile.eq(pdf_file))
            .count(&self.db)
            .await
            .map_err(query_error("文档"))?;

        Ok(count > 0)
    }

    /// 分页列出文档
    pub async fn list_documents_with_pagination_impl(
        &self,
        query: DocumentListQuery,
    ) -> Result<PaginatedResponse<Document>> {
        let page = std::cmp::Ord::max(query.page, 1);
        let size = query.size.clamp(1, 100);

        let mut select = Documents::find().filter(Column::Active.eq(true));

        // 分类筛选
        if let Some(ref category) = query.category
            && !category.trim().is_empty()
        {
            select = select.filter(Column::Category.eq(category.trim()));
        }

        // 类型筛选
        if let Some(document_type) = query.document_type {
            select = select.filter(Column::DocumentType.eq(document_type.to_string()));
        }

        // 标题、摘要、关键词模糊搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = format!("%{}%", escape_like_pattern(search.trim()));
            let like = || LikeExpr::new(pattern.clone()).escape('\\');
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(like()))
                    .add(Column::Description.like(like()))
                    .add(Column::Keywords.like(like())),
            );
        }

        select = select
            .order_by_desc(Column::UploadedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(query_error("文档总数"))?;

        let items: Vec<Document> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(query_error("文档列表"))?
            .into_iter()
            .map(|m| m.into_document())
            .collect();

        Ok(PaginatedResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn list_document_categories_impl(&self) -> Result<Vec<String>> {
        self.distinct_document_column(Column::Category).await
    }

    pub async fn list_document_types_impl(&self) -> Result<Vec<String>> {
        self.distinct_document_column(Column::DocumentType).await
    }

    async fn distinct_document_column(&self, column: Column) -> Result<Vec<String>> {
        Documents::find()
            .select_only()
            .column(column)
            .distinct()
            .filter(Column::Active.eq(true))
            .order_by_asc(column)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(query_error("文档分类"))
    }

    pub async fn increment_document_downloads_impl(&self, id: i64) -> Result<bool> {
        let result = Documents::update_many()
            .col_expr(Column::Downloads, Expr::col(Column::Downloads).add(1))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                crate::errors::PortalError::database_operation(format!("更新下载次数失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::professors::tests::professor_request;
    use super::*;
    use crate::models::documents::entities::DocumentType;

    fn document(author_id: i64, title: &str, ty: DocumentType, category: &str) -> CreateDocumentRequest {
        CreateDocumentRequest {
            title: title.to_string(),
            description: Some(format!("Resumen de {title}")),
            author_id,
            document_type: ty,
            category: category.to_string(),
            pdf_file: Some(format!("{}.pdf", title.to_lowercase().replace(' ', "_"))),
            external_url: None,
            isbn: None,
            publication_date: chrono::NaiveDate::from_ymd_opt(2023, 5, 17),
            keywords: vec!["puerto".to_string(), "carga".to_string()],
        }
    }

    async fn seeded() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let p = storage
            .create_professor_impl(professor_request("V-5000001", "Luis", "Bravo", true))
            .await
            .unwrap();
        for (title, ty, cat) in [
            ("Logistica Portuaria", DocumentType::Thesis, "Logística"),
            ("Manual de Radar", DocumentType::Manual, "Navegación"),
            ("Convenio 100% SOLAS", DocumentType::Article, "Seguridad"),
        ] {
            storage
                .create_document_impl(document(p.id, title, ty, cat))
                .await
                .unwrap();
        }
        (storage, p.id)
    }

    #[tokio::test]
    async fn test_create_keeps_keywords_and_date() {
        let (storage, _) = seeded().await;
        let page = storage
            .list_documents_with_pagination_impl(DocumentListQuery {
                page: 1,
                size: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 3);
        let doc = &page.items[0];
        assert_eq!(doc.keywords, vec!["puerto", "carga"]);
        assert_eq!(
            doc.publication_date,
            chrono::NaiveDate::from_ymd_opt(2023, 5, 17)
        );
        assert!(
            storage
                .document_exists_by_pdf_file_impl("manual_de_radar.pdf")
                .await
                .unwrap()
        );
        assert!(
            !storage
                .document_exists_by_pdf_file_impl("otro.pdf")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_filters_and_search() {
        let (storage, _) = seeded().await;

        let by_type = storage
            .list_documents_with_pagination_impl(DocumentListQuery {
                page: 1,
                size: 10,
                document_type: Some(DocumentType::Manual),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_type.items.len(), 1);
        assert_eq!(by_type.items[0].title, "Manual de Radar");

        let by_category = storage
            .list_documents_with_pagination_impl(DocumentListQuery {
                page: 1,
                size: 10,
                category: Some("Logística".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_category.items.len(), 1);

        // % 按字面匹配
        let literal = storage
            .list_documents_with_pagination_impl(DocumentListQuery {
                page: 1,
                size: 10,
                search: Some("100%".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(literal.items.len(), 1);
        assert_eq!(literal.items[0].title, "Convenio 100% SOLAS");

        let by_keyword = storage
            .list_documents_with_pagination_impl(DocumentListQuery {
                page: 1,
                size: 10,
                search: Some("puerto".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_keyword.items.len(), 3);
    }

    #[tokio::test]
    async fn test_pagination_and_distinct_values() {
        let (storage, _) = seeded().await;
        let second = storage
            .list_documents_with_pagination_impl(DocumentListQuery {
                page: 2,
                size: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.pagination.total_pages, 2);

        let categories = storage.list_document_categories_impl().await.unwrap();
        assert_eq!(categories, vec!["Logística", "Navegación", "Seguridad"]);
        let types = storage.list_document_types_impl().await.unwrap();
        assert_eq!(types, vec!["articulo", "manual", "tesis"]);
    }

    #[tokio::test]
    async fn test_download_counter() {
        let (storage, _) = seeded().await;
        let doc = storage
            .list_documents_with_pagination_impl(DocumentListQuery {
                page: 1,
                size: 1,
                ..Default::default()
            })
            .await
            .unwrap()
            .items
            .remove(0);
        assert!(storage.increment_document_downloads_impl(doc.id).await.unwrap());
        assert!(storage.increment_document_downloads_impl(doc.id).await.unwrap());
        let reloaded = storage
            .get_document_by_id_impl(doc.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.downloads, 2);
        assert!(!storage.increment_document_downloads_impl(9999).await.unwrap());
    }
}
