use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "professor.ts")]
pub struct Professor {
    pub id: i64,
    pub cedula: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub subjects: Vec<String>,
    pub experience_years: Option<i32>,
    pub academic_title: Option<String>,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub registered_at: chrono::DateTime<chrono::Utc>,
    pub active: bool,
}

impl Professor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// 评价页面展示的公开资料
    pub fn public_profile(&self) -> ProfessorPublicProfile {
        ProfessorPublicProfile {
            id: self.id,
            full_name: self.full_name(),
            department: self.department.clone(),
            academic_title: self.academic_title.clone(),
            subjects: self.subjects.clone(),
        }
    }
}

// 教师公开资料
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "professor.ts")]
pub struct ProfessorPublicProfile {
    pub id: i64,
    pub full_name: String,
    pub department: String,
    pub academic_title: Option<String>,
    pub subjects: Vec<String>,
}

/// 将逗号分隔的科目字符串拆分为列表
pub fn split_subjects(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// 将科目列表合并为逗号分隔字符串
pub fn join_subjects(subjects: &[String]) -> Option<String> {
    let joined = subjects
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() { None } else { Some(joined) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_subjects() {
        assert_eq!(
            split_subjects(Some("Navegación, Cartografía ,,Radar")),
            vec!["Navegación", "Cartografía", "Radar"]
        );
        assert!(split_subjects(None).is_empty());
        assert!(split_subjects(Some("  ")).is_empty());
    }

    #[test]
    fn test_join_subjects() {
        let subjects = vec!["Derecho".to_string(), " ".to_string(), "Puertos".to_string()];
        assert_eq!(join_subjects(&subjects).as_deref(), Some("Derecho, Puertos"));
        assert_eq!(join_subjects(&[]), None);
    }
}
