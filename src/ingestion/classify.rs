//! 基于关键词的文档分类
//!
//! 规则按顺序匹配，命中第一条即返回。比较前文本会去重音、小写化，
//! 分隔符替换为空格，并在首尾补空格，因此规则中带空格的片段可以匹配整词。

use crate::models::documents::entities::DocumentType;
use crate::utils::text::fold;

use super::pdf_metadata::PdfMetadata;

pub const DEFAULT_CATEGORY: &str = "General";

const TYPE_RULES: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::Thesis,
        &[" tesis ", " thesis ", " tesina ", "trabajo de grado", "trabajo especial de grado"],
    ),
    (
        DocumentType::Manual,
        &["manual", "guia", "handbook", "instructivo", "procedimiento"],
    ),
    (DocumentType::Book, &["libro", " book ", " tomo "]),
];

const CATEGORY_RULES: &[(&str, &[&str])] = &[
    (
        "Seguridad Marítima",
        &[
            "seguridad",
            "solas",
            "safety",
            "salvamento",
            "incendio",
            "supervivencia",
            "isps",
            "emergencia",
            "marpol",
            "contaminacion",
        ],
    ),
    (
        "Derecho Marítimo",
        &[
            "derecho",
            "legislacion",
            " ley ",
            "juridic",
            " law ",
            "legal",
            "convenio",
            "fletamento",
        ],
    ),
    (
        "Meteorología y Oceanografía",
        &[
            "meteorolog",
            "oceanograf",
            "clima",
            "oleaje",
            "marea",
            "weather",
            "ocean",
        ],
    ),
    (
        "Logística Portuaria",
        &[
            "logistic",
            "portuari",
            "puerto",
            " port ",
            "contenedor",
            "container",
            "aduana",
            "estiba",
            "cadena de suministro",
        ],
    ),
    (
        "Navegación",
        &[
            "navegacion",
            "navigation",
            "cartograf",
            "carta nautica",
            "radar",
            "ecdis",
            " gps ",
            "astronom",
            "pilotaje",
            "colreg",
        ],
    ),
    (
        "Ingeniería Marítima",
        &[
            "ingenieria",
            "engineering",
            "motor",
            "maquina",
            "propulsion",
            "naval",
            "casco",
            "diesel",
            "turbina",
            "mantenimiento",
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub document_type: DocumentType,
    pub category: String,
}

fn haystack(file_name: &str, meta: &PdfMetadata) -> String {
    let stem = std::path::Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let parts = [
        Some(stem),
        meta.title.as_deref(),
        meta.subject.as_deref(),
        meta.keywords.as_deref(),
    ];
    let joined = parts.into_iter().flatten().collect::<Vec<_>>().join(" ");
    let spaced: String = fold(&joined)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    format!(" {} ", spaced.split_whitespace().collect::<Vec<_>>().join(" "))
}

pub fn classify(file_name: &str, meta: &PdfMetadata) -> Classification {
    let text = haystack(file_name, meta);
    let hit = |patterns: &[&str]| patterns.iter().any(|p| text.contains(p));

    let document_type = TYPE_RULES
        .iter()
        .find(|(_, patterns)| hit(patterns))
        .map_or(DocumentType::Article, |(t, _)| *t);
    let category = CATEGORY_RULES
        .iter()
        .find(|(_, patterns)| hit(patterns))
        .map_or(DEFAULT_CATEGORY, |(c, _)| *c);

    Classification {
        document_type,
        category: category.to_string(),
    }
}
