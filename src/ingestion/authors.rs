//! 作者解析
//!
//! 元数据中的作者名与激活的教师匹配，依次尝试：完整姓名相同、作者各词均出现在教师姓名中、
//! 名的首词加第一个姓相同。都不匹配时创建未激活的占位教师。

use tracing::{debug, info};

use crate::config::RepositoryConfig;
use crate::errors::{PortalError, Result};
use crate::models::professors::entities::Professor;
use crate::models::professors::requests::CreateProfessorRequest;
use crate::storage::Storage;
use crate::utils::password::random_password_hash;
use crate::utils::text::fold;

const HONORIFICS: &[&str] = &[
    "dr", "dra", "ing", "msc", "mgs", "mg", "prof", "profa", "lic", "licda", "phd", "cap", "capt",
    "abg", "arq", "sr", "sra", "esp", "tsu",
];

const PLACEHOLDER_EMAIL_DOMAIN: &str = "repositorio.umc.edu.ve";

/// 单词的比较键：去重音、小写、去掉点号，其余符号视为分隔
fn token_keys(word: &str) -> Vec<String> {
    fold(&word.replace('.', ""))
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(String::from)
        .collect()
}

fn is_honorific(key: &str) -> bool {
    HONORIFICS.contains(&key)
}

/// 规范化姓名：小写、去重音、合并空白、去掉学术头衔
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .flat_map(token_keys)
        .filter(|k| !is_honorific(k))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 去掉头衔后的展示用姓名
fn display_name(name: &str) -> String {
    name.split_whitespace()
        .filter(|word| {
            let keys = token_keys(word);
            !keys.is_empty() && !keys.iter().all(|k| is_honorific(k))
        })
        .map(|word| word.trim_matches(|c: char| c == ',' || c == ';'))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 截取连接词 "y" / "and" 之前的部分
fn before_conjunction(name: &str) -> String {
    name.split_whitespace()
        .take_while(|w| !matches!(w.to_lowercase().as_str(), "y" | "and"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 取元数据中的第一作者
///
/// 作者之间以 `;`、`&`、`/`、" y "、" and " 分隔。`Apellido, Nombre` 形式（逗号后只有一个词）
/// 会被调整为 `Nombre Apellido`；其余逗号视为作者分隔。
pub fn primary_author(raw: &str) -> Option<String> {
    let first = raw
        .split([';', '&', '/', '\n'])
        .map(str::trim)
        .find(|s| !s.is_empty())?;
    let first = before_conjunction(first);

    let parts: Vec<&str> = first.split(',').map(str::trim).collect();
    let ordered = match parts.as_slice() {
        [last, given] if !last.is_empty() && given.split_whitespace().count() == 1 => {
            format!("{given} {last}")
        }
        [head, ..] => head.to_string(),
        [] => return None,
    };

    let name = display_name(&ordered);
    if normalize_name(&name).is_empty() {
        None
    } else {
        Some(name)
    }
}

/// 解析结果；试运行中尚未写入的作者没有 id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAuthor {
    pub id: Option<i64>,
    pub name: String,
    pub created: bool,
}

#[derive(Debug, Clone)]
struct KnownAuthor {
    id: Option<i64>,
    name: String,
    normalized: String,
    tokens: Vec<String>,
    first: String,
    first_surname: String,
}

impl KnownAuthor {
    fn new(id: Option<i64>, first_name: &str, last_name: &str) -> Self {
        let name = format!("{first_name} {last_name}").trim().to_string();
        let normalized = normalize_name(&name);
        let first_token = |s: &str| {
            normalize_name(s)
                .split(' ')
                .next()
                .unwrap_or_default()
                .to_string()
        };
        Self {
            id,
            first: first_token(first_name),
            first_surname: first_token(last_name),
            tokens: normalized.split(' ').map(String::from).collect(),
            normalized,
            name,
        }
    }

    fn from_professor(professor: &Professor) -> Self {
        Self::new(Some(professor.id), &professor.first_name, &professor.last_name)
    }

    fn resolved(&self) -> ResolvedAuthor {
        ResolvedAuthor {
            id: self.id,
            name: self.name.clone(),
            created: false,
        }
    }
}

/// 按三级规则查找，同级多个候选时取列表中靠前的
fn find_match<'a>(known: &'a [KnownAuthor], normalized: &str) -> Option<&'a KnownAuthor> {
    let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
    if tokens.is_empty() {
        return None;
    }

    known
        .iter()
        .find(|k| k.normalized == normalized)
        .or_else(|| {
            if tokens.len() < 2 {
                return None;
            }
            known
                .iter()
                .find(|k| tokens.iter().all(|t| k.tokens.iter().any(|kt| kt == t)))
        })
        .or_else(|| {
            if tokens.len() < 2 {
                return None;
            }
            known.iter().find(|k| {
                !k.first_surname.is_empty()
                    && tokens[0] == k.first
                    && tokens[1..].contains(&k.first_surname.as_str())
            })
        })
}

/// 拆分为名和姓：四个词以上时前两个词为名
fn split_full_name(name: &str) -> (String, String) {
    let words: Vec<&str> = name.split_whitespace().collect();
    let given = if words.len() >= 4 { 2 } else { 1 };
    let given = given.min(words.len());
    (words[..given].join(" "), words[given..].join(" "))
}

fn placeholder_email(normalized: &str) -> String {
    let slug: String = normalized
        .split(' ')
        .map(|t| t.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(".");
    let slug = if slug.is_empty() { "autor".to_string() } else { slug };
    format!("{slug}@{PLACEHOLDER_EMAIL_DOMAIN}")
}

fn placeholder_cedula() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("REPO-{}", id[..10].to_uppercase())
}

/// 一次导入过程中的作者解析器，记住本次创建的作者
pub struct AuthorResolver<'a> {
    storage: &'a dyn Storage,
    config: &'a RepositoryConfig,
    dry_run: bool,
    known: Vec<KnownAuthor>,
    default_author: Option<ResolvedAuthor>,
}

impl<'a> AuthorResolver<'a> {
    pub async fn new(
        storage: &'a dyn Storage,
        config: &'a RepositoryConfig,
        dry_run: bool,
    ) -> Result<Self> {
        let professors = storage.list_active_professors().await?;
        debug!("Loaded {} active professor(s) for author matching", professors.len());
        Ok(Self {
            storage,
            config,
            dry_run,
            known: professors.iter().map(KnownAuthor::from_professor).collect(),
            default_author: None,
        })
    }

    /// 解析元数据中的作者字段，缺失时使用默认作者
    pub async fn resolve(&mut self, author: Option<&str>) -> Result<ResolvedAuthor> {
        let Some(name) = author.and_then(primary_author) else {
            return self.default_author().await;
        };
        let normalized = normalize_name(&name);
        if let Some(known) = find_match(&self.known, &normalized) {
            return Ok(known.resolved());
        }

        let email = placeholder_email(&normalized);
        let resolved = self.find_or_create(&name, &email).await?;
        let (first, last) = split_full_name(&resolved.name);
        self.known.push(KnownAuthor::new(resolved.id, &first, &last));
        Ok(resolved)
    }

    async fn default_author(&mut self) -> Result<ResolvedAuthor> {
        if let Some(author) = &self.default_author {
            return Ok(ResolvedAuthor {
                created: false,
                ..author.clone()
            });
        }
        let author = self
            .find_or_create(
                &self.config.default_author_name,
                &self.config.default_author_email,
            )
            .await?;
        self.default_author = Some(author.clone());
        Ok(author)
    }

    /// 按邮箱复用已有的占位教师，否则创建（试运行只记录不写入）
    async fn find_or_create(&self, name: &str, email: &str) -> Result<ResolvedAuthor> {
        if let Some(existing) = self.storage.get_professor_by_email(email).await? {
            return Ok(ResolvedAuthor {
                id: Some(existing.id),
                name: existing.full_name(),
                created: false,
            });
        }
        if self.dry_run {
            return Ok(ResolvedAuthor {
                id: None,
                name: name.to_string(),
                created: true,
            });
        }

        let (first_name, last_name) = split_full_name(name);
        let request = CreateProfessorRequest {
            cedula: placeholder_cedula(),
            first_name,
            last_name,
            email: email.to_string(),
            phone: None,
            department: self.config.placeholder_department.clone(),
            subjects: Vec::new(),
            experience_years: None,
            academic_title: None,
            password_hash: random_password_hash()?,
            active: false,
        };
        match self.storage.create_professor(request).await {
            Ok(professor) => {
                info!(
                    "Created placeholder author {} (ID: {})",
                    professor.full_name(),
                    professor.id
                );
                Ok(ResolvedAuthor {
                    id: Some(professor.id),
                    name: professor.full_name(),
                    created: true,
                })
            }
            Err(PortalError::Conflict(_)) => {
                let existing = self
                    .storage
                    .get_professor_by_email(email)
                    .await?
                    .ok_or_else(|| PortalError::database_operation("占位作者创建冲突"))?;
                Ok(ResolvedAuthor {
                    id: Some(existing.id),
                    name: existing.full_name(),
                    created: false,
                })
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, professor_request};

    fn repository_config() -> RepositoryConfig {
        RepositoryConfig {
            library_dir: "unused".to_string(),
            default_author_name: "Autor Desconocido".to_string(),
            default_author_email: "repositorio@umc.edu.ve".to_string(),
            placeholder_department: "Repositorio Digital".to_string(),
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Dr.  José   PÉREZ "), "jose perez");
        assert_eq!(normalize_name("Ing. MSc. María Gómez"), "maria gomez");
        assert_eq!(normalize_name("M.Sc. Ana Ruiz"), "ana ruiz");
        assert_eq!(normalize_name("Prof."), "");
        // macOS 文件名和部分 PDF 元数据使用分解形式
        assert_eq!(normalize_name("Jose\u{301} Pe\u{301}rez"), "jose perez");
        assert_eq!(normalize_name("Dr. Nun\u{303}ez"), "nunez");
    }

    #[test]
    fn test_primary_author() {
        assert_eq!(
            primary_author("Dr. Luis Rojas; Ana Ruiz").as_deref(),
            Some("Luis Rojas")
        );
        assert_eq!(
            primary_author("Luis Rojas y Ana Ruiz").as_deref(),
            Some("Luis Rojas")
        );
        assert_eq!(primary_author("Rojas, Luis").as_deref(), Some("Luis Rojas"));
        assert_eq!(
            primary_author("Luis Rojas, Ana Ruiz").as_deref(),
            Some("Luis Rojas")
        );
        assert_eq!(primary_author(" ; "), None);
        assert_eq!(primary_author("Ing."), None);
    }

    #[test]
    fn test_match_tiers() {
        let known = vec![
            KnownAuthor::new(Some(1), "Carlos Alberto", "Rivas Mora"),
            KnownAuthor::new(Some(2), "María", "Gómez"),
        ];
        // 完整姓名
        assert_eq!(find_match(&known, "maria gomez").unwrap().id, Some(2));
        assert_eq!(
            find_match(&known, &normalize_name("Mari\u{301}a Go\u{301}mez"))
                .unwrap()
                .id,
            Some(2)
        );
        // 各词都在教师姓名中
        assert_eq!(find_match(&known, "carlos rivas").unwrap().id, Some(1));
        // 名首词加第一个姓
        assert_eq!(
            find_match(&known, "carlos enrique rivas").unwrap().id,
            Some(1)
        );
        // 单个词不做部分匹配
        assert!(find_match(&known, "gomez").is_none());
        assert!(find_match(&known, "pedro gomez").is_none());
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(split_full_name("Luis"), ("Luis".into(), "".into()));
        assert_eq!(
            split_full_name("Luis Rojas Pérez"),
            ("Luis".into(), "Rojas Pérez".into())
        );
        assert_eq!(
            split_full_name("Luis Alberto Rojas Pérez"),
            ("Luis Alberto".into(), "Rojas Pérez".into())
        );
        assert_eq!(placeholder_email("jose perez"), "jose.perez@repositorio.umc.edu.ve");
    }

    #[tokio::test]
    async fn test_resolve_matches_and_creates_once() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_professor(professor_request("V-2000001", "María", "Gómez", true))
            .await
            .unwrap();
        let config = repository_config();
        let mut resolver = AuthorResolver::new(&storage, &config, false).await.unwrap();

        let matched = resolver.resolve(Some("Dra. Maria GOMEZ")).await.unwrap();
        assert!(matched.id.is_some());
        assert!(!matched.created);
        assert_eq!(matched.name, "María Gómez");

        let created = resolver.resolve(Some("Pedro Salas")).await.unwrap();
        assert!(created.created);
        let placeholder = storage
            .get_professor_by_id(created.id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!placeholder.active);
        assert_eq!(placeholder.department, "Repositorio Digital");
        assert_eq!(placeholder.email, "pedro.salas@repositorio.umc.edu.ve");

        let again = resolver.resolve(Some("Ing. Pedro Salas")).await.unwrap();
        assert_eq!(again.id, created.id);
        assert!(!again.created);
    }

    #[tokio::test]
    async fn test_default_author_created_once() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let config = repository_config();
        let mut resolver = AuthorResolver::new(&storage, &config, false).await.unwrap();

        let first = resolver.resolve(None).await.unwrap();
        assert!(first.created);
        assert_eq!(first.name, "Autor Desconocido");
        let second = resolver.resolve(Some("  ")).await.unwrap();
        assert_eq!(second.id, first.id);
        assert!(!second.created);

        // 新的导入过程按邮箱找到已有的默认作者
        let mut next_run = AuthorResolver::new(&storage, &config, false).await.unwrap();
        let third = next_run.resolve(None).await.unwrap();
        assert_eq!(third.id, first.id);
        assert!(!third.created);
    }

    #[tokio::test]
    async fn test_dry_run_does_not_write() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let config = repository_config();
        let mut resolver = AuthorResolver::new(&storage, &config, true).await.unwrap();

        let author = resolver.resolve(Some("Pedro Salas")).await.unwrap();
        assert_eq!(author.id, None);
        assert!(author.created);
        let reused = resolver.resolve(Some("pedro salas")).await.unwrap();
        assert!(!reused.created);
        assert_eq!(storage.count_professors().await.unwrap(), 0);
    }
}
