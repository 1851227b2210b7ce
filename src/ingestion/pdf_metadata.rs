use std::path::Path;

use chrono::NaiveDate;
use lopdf::{Dictionary, Document, Object};

use crate::errors::Result;

/// 从 PDF `Info` 字典读取的元数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creation_date: Option<NaiveDate>,
}

/// 读取文件的元数据，文件无法解析时返回 PdfParse 错误
pub fn read_metadata(path: &Path) -> Result<PdfMetadata> {
    let document = Document::load(path)?;
    Ok(metadata_from_document(&document))
}

/// 从已加载的文档读取元数据，缺少 `Info` 时返回空元数据
pub fn metadata_from_document(document: &Document) -> PdfMetadata {
    let Some(info) = info_dictionary(document) else {
        return PdfMetadata::default();
    };

    let text = |key: &[u8]| text_entry(document, info, key);
    PdfMetadata {
        title: text(b"Title"),
        author: text(b"Author"),
        subject: text(b"Subject"),
        keywords: text(b"Keywords"),
        creation_date: text(b"CreationDate").and_then(|d| parse_pdf_date(&d)),
    }
}

fn info_dictionary(document: &Document) -> Option<&Dictionary> {
    let info = document.trailer.get(b"Info").ok()?;
    let (_, info) = document.dereference(info).ok()?;
    info.as_dict().ok()
}

fn text_entry(document: &Document, info: &Dictionary, key: &[u8]) -> Option<String> {
    let value = info.get(key).ok()?;
    let (_, value) = document.dereference(value).ok()?;
    match value {
        Object::String(bytes, _) => {
            let decoded = decode_pdf_string(bytes);
            if decoded.is_empty() { None } else { Some(decoded) }
        }
        _ => None,
    }
}

// PDFDocEncoding 中与 Latin-1 不同的区段：0x18..=0x1F 和 0x80..=0xA0
const PDF_DOC_LOW: [char; 8] = ['˘', 'ˇ', 'ˆ', '˙', '˝', '˛', '˚', '˜'];
const PDF_DOC_HIGH: [char; 33] = [
    '•', '†', '‡', '…', '—', '–', 'ƒ', '⁄', '‹', '›', '−', '‰', '„', '“', '”', '‘', '’', '‚',
    '™', 'ﬁ', 'ﬂ', 'Ł', 'Œ', 'Š', 'Ÿ', 'Ž', 'ı', 'ł', 'œ', 'š', 'ž', '\u{FFFD}', '€',
];

fn pdf_doc_char(b: u8) -> char {
    match b {
        0x18..=0x1F => PDF_DOC_LOW[usize::from(b - 0x18)],
        0x80..=0xA0 => PDF_DOC_HIGH[usize::from(b - 0x80)],
        // 0xAD 未定义
        0xAD => '\u{FFFD}',
        _ => char::from(b),
    }
}

/// 解码 PDF 文本字符串
///
/// 带 BOM 时按 UTF-16BE 或 UTF-8 解码，否则按 PDFDocEncoding 解码。
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    let decoded = if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        bytes.iter().map(|&b| pdf_doc_char(b)).collect()
    };
    decoded
        .chars()
        .filter(|&c| (!c.is_control() || c.is_whitespace()) && c != '\u{FFFD}')
        .collect::<String>()
        .trim()
        .to_string()
}

/// 解析 `D:YYYYMMDDHHmmSS...` 格式的日期，只取日期部分
///
/// 月和日缺省为 01。
pub fn parse_pdf_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let raw = raw.strip_prefix("D:").unwrap_or(raw);
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).take(8).collect();
    if digits.len() < 4 {
        return None;
    }
    let year = digits[0..4].parse().ok()?;
    let month = digits.get(4..6).map_or(Some(1), |m| m.parse().ok())?;
    let day = digits.get(6..8).map_or(Some(1), |d| d.parse().ok())?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::{StringFormat, dictionary};

    /// 生成带 `Info` 字典的最小 PDF
    pub(crate) fn write_pdf(path: &Path, info: &[(&str, Object)]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if !info.is_empty() {
            let mut dict = Dictionary::new();
            for (key, value) in info {
                dict.set(*key, value.clone());
            }
            let info_id = doc.add_object(dict);
            doc.trailer.set("Info", info_id);
        }
        doc.save(path).unwrap();
    }

    pub(crate) fn literal(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec(), StringFormat::Literal)
    }

    fn utf16(s: &str) -> Vec<u8> {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in s.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        bytes
    }

    #[test]
    fn test_decode_pdf_string() {
        assert_eq!(decode_pdf_string(&utf16("Navegación 航海")), "Navegación 航海");
        // Latin-1 的 0xF3 为 ó
        assert_eq!(decode_pdf_string(b"Legislaci\xF3n  "), "Legislación");
        assert_eq!(decode_pdf_string(b"\xEF\xBB\xBFEstiba"), "Estiba");
        assert_eq!(decode_pdf_string(b"\x00\x00"), "");
        // PDFDocEncoding 专有字符：项目符号、破折号、弯引号、连字
        assert_eq!(
            decode_pdf_string(b"\x80 Radar \x84 \x8Dcolreg\x8E \x93ltro"),
            "• Radar — “colreg” ﬁltro"
        );
        assert_eq!(decode_pdf_string(b"Costo \xA0 5"), "Costo € 5");
    }

    #[test]
    fn test_parse_pdf_date() {
        assert_eq!(
            parse_pdf_date("D:20190315103000-04'00'"),
            NaiveDate::from_ymd_opt(2019, 3, 15)
        );
        assert_eq!(parse_pdf_date("2021"), NaiveDate::from_ymd_opt(2021, 1, 1));
        assert_eq!(parse_pdf_date("D:202113"), None);
        assert_eq!(parse_pdf_date("D:19"), None);
        assert_eq!(parse_pdf_date("sin fecha"), None);
    }

    #[test]
    fn test_read_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solas.pdf");
        write_pdf(
            &path,
            &[
                (
                    "Title",
                    Object::String(utf16("Convenio SOLAS comentado"), StringFormat::Hexadecimal),
                ),
                ("Author", literal("Ing. María Pérez")),
                ("Subject", literal("Seguridad de la vida humana en el mar")),
                ("Keywords", literal("solas; seguridad")),
                ("CreationDate", literal("D:20200102")),
            ],
        );

        let meta = read_metadata(&path).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Convenio SOLAS comentado"));
        // UTF-8 字节按 Latin-1 解码后不等于原文，只检查前缀
        assert!(meta.author.as_deref().unwrap().starts_with("Ing. Mar"));
        assert_eq!(meta.keywords.as_deref(), Some("solas; seguridad"));
        assert_eq!(meta.creation_date, NaiveDate::from_ymd_opt(2020, 1, 2));
    }

    #[test]
    fn test_missing_info_and_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.pdf");
        write_pdf(&path, &[]);
        assert_eq!(read_metadata(&path).unwrap(), PdfMetadata::default());

        let broken = dir.path().join("broken.pdf");
        std::fs::write(&broken, b"%PDF-1.4\nnot really a pdf").unwrap();
        assert_eq!(read_metadata(&broken).unwrap_err().code(), "E013");
    }
}
