use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 文档类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "document.ts")]
pub enum DocumentType {
    #[serde(rename = "tesis")]
    Thesis,
    #[serde(rename = "articulo")]
    Article,
    #[serde(rename = "libro")]
    Book,
    #[serde(rename = "manual")]
    Manual,
}

impl DocumentType {
    pub const THESIS: &'static str = "tesis";
    pub const ARTICLE: &'static str = "articulo";
    pub const BOOK: &'static str = "libro";
    pub const MANUAL: &'static str = "manual";

    pub fn all() -> &'static [DocumentType] {
        &[
            DocumentType::Thesis,
            DocumentType::Article,
            DocumentType::Book,
            DocumentType::Manual,
        ]
    }
}

impl<'de> Deserialize<'de> for DocumentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid document type: '{s}'. Expected one of: tesis, articulo, libro, manual"
            ))
        })
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DocumentType::Thesis => DocumentType::THESIS,
            DocumentType::Article => DocumentType::ARTICLE,
            DocumentType::Book => DocumentType::BOOK,
            DocumentType::Manual => DocumentType::MANUAL,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tesis" => Ok(DocumentType::Thesis),
            "articulo" | "artículo" => Ok(DocumentType::Article),
            "libro" => Ok(DocumentType::Book),
            "manual" => Ok(DocumentType::Manual),
            _ => Err(format!("Invalid document type: {s}")),
        }
    }
}

// 文档库条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "document.ts")]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub author_id: i64,
    pub document_type: DocumentType,
    pub category: String,
    pub pdf_file: Option<String>,
    pub external_url: Option<String>,
    pub isbn: Option<String>,
    pub publication_date: Option<chrono::NaiveDate>,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub downloads: i32,
    pub active: bool,
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_roundtrip_names() {
        for t in DocumentType::all() {
            assert_eq!(t.to_string().parse::<DocumentType>().unwrap(), *t);
        }
        assert_eq!("Artículo".parse::<DocumentType>(), Ok(DocumentType::Article));
        assert!("revista".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_document_type_serde() {
        let json = serde_json::to_string(&DocumentType::Thesis).unwrap();
        assert_eq!(json, r#""tesis""#);
        let t: DocumentType = serde_json::from_str(r#""libro""#).unwrap();
        assert_eq!(t, DocumentType::Book);
    }
}
