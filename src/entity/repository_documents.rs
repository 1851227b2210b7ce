//! 文档库实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "repository_documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub author_id: i64,
    pub document_type: String,
    pub category: String,
    pub pdf_file: Option<String>,
    pub external_url: Option<String>,
    pub isbn: Option<String>,
    pub publication_date: Option<String>,
    pub uploaded_at: i64,
    pub downloads: i32,
    pub active: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub keywords: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::AuthorId",
        to = "super::professors::Column::Id"
    )]
    Author,
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_document(self) -> crate::models::documents::entities::Document {
        use crate::models::documents::entities::{Document, DocumentType};

        Document {
            id: self.id,
            title: self.title,
            description: self.description,
            author_id: self.author_id,
            document_type: self
                .document_type
                .parse::<DocumentType>()
                .unwrap_or(DocumentType::Article),
            category: self.category,
            pdf_file: self.pdf_file,
            external_url: self.external_url,
            isbn: self.isbn,
            publication_date: super::parse_iso_date(self.publication_date),
            uploaded_at: super::timestamp_to_datetime(self.uploaded_at),
            downloads: self.downloads,
            active: self.active,
            keywords: self
                .keywords
                .as_deref()
                .map(|k| {
                    k.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}
