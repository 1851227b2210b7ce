//! 文本规范化工具
//!
//! 分类规则、作者匹配和术语查询都基于去除重音、小写化后的文本比较。

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// 去除重音：先做 NFD 分解，再丢弃组合附加符号
///
/// 预组合字符 (é) 与分解形式 (e + U+0301) 得到相同结果。
pub fn strip_accents(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'ß' { 's' } else { c })
        .collect()
}

/// 小写、去重音、合并空白
pub fn fold(input: &str) -> String {
    strip_accents(input)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 生成安全的文件名：只保留字母数字、点、连字符和下划线，空白变为下划线
pub fn secure_filename(name: &str) -> String {
    // 去掉客户端可能附带的目录部分
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = strip_accents(base)
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// 由文件名生成可读标题：去扩展名，分隔符变为空格，首字母大写
pub fn humanize_file_stem(file_name: &str) -> String {
    let stem = std::path::Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let words: Vec<String> = stem
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    words.join(" ")
}

/// 关键词列表，逗号或分号分隔
pub fn split_keywords(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split([',', ';'])
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold() {
        assert_eq!(fold("  Navegación   MARÍTIMA "), "navegacion maritima");
        assert_eq!(fold("Logística Portuaria"), "logistica portuaria");
        assert_eq!(fold("Ñandú"), "nandu");
        // 分解形式
        assert_eq!(fold("Navegacio\u{301}n"), "navegacion");
        assert_eq!(fold("N\u{303}andu\u{301}"), "nandu");
        assert_eq!(fold("Ça\u{308}"), "ca");
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("Manual de Radar.pdf"), "Manual_de_Radar.pdf");
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("C:\\docs\\Tésis final.pdf"), "Tesis_final.pdf");
        assert_eq!(secure_filename("..."), "file");
    }

    #[test]
    fn test_humanize_file_stem() {
        assert_eq!(
            humanize_file_stem("manual_de_navegacion-costera.pdf"),
            "Manual De Navegacion Costera"
        );
        assert_eq!(humanize_file_stem("tesis.pdf"), "Tesis");
    }

    #[test]
    fn test_split_keywords() {
        assert_eq!(
            split_keywords(Some("radar, ARPA;; colisiones ")),
            vec!["radar", "ARPA", "colisiones"]
        );
        assert!(split_keywords(None).is_empty());
    }
}
