//! 术语查询
//!
//! 消息与术语都先去重音、小写化；拉丁文字按整词匹配，两个字以上的中文术语按子串匹配。

use super::glossary::{GLOSSARY, vocabulary_table};
use crate::models::chatbot::GlossaryEntry;
use crate::utils::text::fold;

pub const FALLBACK_REPLY: &str =
    "Lo siento, no pude generar una respuesta. Por favor, intenta de nuevo.";

// 请求完整词汇表的关键词
const VOCABULARY_KEYWORDS: &[&str] = &["vocabulario", "vocabulary", "lista", "list"];

/// 去重音小写后，非字母数字字符替换为空格，两端补空格便于整词匹配
fn padded(text: &str) -> String {
    let words: String = fold(text)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    format!(" {} ", words.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn mentions(haystack: &str, term: &str) -> bool {
    if term.chars().any(|c| !c.is_ascii())
        && !term.chars().any(|c| c.is_ascii_alphabetic())
        && term.chars().count() >= 2
    {
        // 中文等无空格分词的文字；单字术语 (节、舵) 只按独立词匹配
        return haystack.contains(term);
    }
    let needle = padded(term);
    !needle.trim().is_empty() && haystack.contains(&needle)
}

/// 消息中出现的术语条目，按术语表顺序
pub fn find_terms(message: &str) -> Vec<&'static GlossaryEntry> {
    let haystack = padded(message);
    GLOSSARY
        .iter()
        .filter(|entry| entry.terms().iter().any(|t| mentions(&haystack, t)))
        .collect()
}

fn describe(entry: &GlossaryEntry) -> String {
    let mut name = entry.spanish.clone();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!(
        "**{}**: {}\n- Inglés: {}\n- Francés: {}\n- Alemán: {}\n- Chino mandarín: {}",
        name, entry.definition, entry.english, entry.french, entry.german, entry.mandarin
    )
}

/// 根据消息生成回答
pub fn answer(message: &str) -> String {
    let haystack = padded(message);
    if VOCABULARY_KEYWORDS
        .iter()
        .any(|k| haystack.contains(&format!(" {k} ")))
    {
        return format!(
            "Vocabulario marítimo básico:\n\n{}",
            vocabulary_table()
        );
    }

    let matches = find_terms(message);
    if matches.is_empty() {
        return FALLBACK_REPLY.to_string();
    }
    matches
        .into_iter()
        .map(describe)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_insensitive_lookup() {
        let reply = answer("¿Cómo se dice TIMON en inglés?");
        assert!(reply.contains("**Timón**"));
        assert!(reply.contains("rudder"));
    }

    #[test]
    fn test_lookup_from_other_languages() {
        let names: Vec<&str> = find_terms("What is the starboard side? Und der Anker?")
            .iter()
            .map(|e| e.spanish.as_str())
            .collect();
        assert_eq!(names, vec!["ancla", "estribor"]);

        let names: Vec<&str> = find_terms("灯塔是什么")
            .iter()
            .map(|e| e.spanish.as_str())
            .collect();
        assert_eq!(names, vec!["faro"]);
    }

    #[test]
    fn test_single_character_cjk_terms() {
        // "节日" 和 "舵手们" 中的单字不算术语
        assert!(find_terms("节日快乐").is_empty());
        assert!(find_terms("舵手们").is_empty());

        let names: Vec<&str> = find_terms("节 是什么意思？")
            .iter()
            .map(|e| e.spanish.as_str())
            .collect();
        assert_eq!(names, vec!["nudo"]);

        let names: Vec<&str> = find_terms("舵")
            .iter()
            .map(|e| e.spanish.as_str())
            .collect();
        assert_eq!(names, vec!["timón"]);
    }

    #[test]
    fn test_whole_word_matching() {
        // "importante" 不应匹配 "port"
        assert!(find_terms("es importante").is_empty());
        let names: Vec<&str> = find_terms("chaleco salvavidas")
            .iter()
            .map(|e| e.spanish.as_str())
            .collect();
        assert_eq!(names, vec!["chaleco salvavidas"]);
    }

    #[test]
    fn test_vocabulary_request() {
        let reply = answer("Dame la lista de vocabulario básico");
        assert!(reply.starts_with("Vocabulario marítimo básico"));
        assert!(reply.contains("| puerto | port |"));
    }

    #[test]
    fn test_fallback() {
        assert_eq!(answer("hola"), FALLBACK_REPLY);
    }
}
