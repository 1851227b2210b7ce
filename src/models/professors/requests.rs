use serde::{Deserialize, Deserializer};
use ts_rs::TS;

// 教师注册请求（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "professor.ts")]
pub struct RegisterProfessorRequest {
    pub cedula: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    /// 支持数组或逗号分隔字符串
    #[serde(deserialize_with = "deserialize_subjects")]
    #[ts(type = "string[] | string")]
    pub subjects: Vec<String>,
    pub experience_years: Option<i32>,
    pub academic_title: Option<String>,
    pub password: String,
}

// 创建教师（存储层使用，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateProfessorRequest {
    pub cedula: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub subjects: Vec<String>,
    pub experience_years: Option<i32>,
    pub academic_title: Option<String>,
    pub password_hash: String,
    pub active: bool,
}

fn deserialize_subjects<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Subjects {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Subjects::deserialize(deserializer)? {
        Subjects::List(list) => list
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Subjects::Text(text) => super::entities::split_subjects(Some(&text)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(subjects: &str) -> String {
        format!(
            r#"{{"cedula":"V-1","first_name":"Ana","last_name":"Díaz","email":"a@umc.edu.ve",
            "department":"Navegación","subjects":{subjects},"password":"Secreto123"}}"#
        )
    }

    #[test]
    fn test_subjects_from_list_or_text() {
        let req: RegisterProfessorRequest =
            serde_json::from_str(&body(r#"["Radar", " Cartas "]"#)).unwrap();
        assert_eq!(req.subjects, vec!["Radar", "Cartas"]);

        let req: RegisterProfessorRequest =
            serde_json::from_str(&body(r#""Radar, Cartas""#)).unwrap();
        assert_eq!(req.subjects, vec!["Radar", "Cartas"]);
    }
}
