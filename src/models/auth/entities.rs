use crate::models::professors::entities::Professor;
use crate::models::students::entities::Student;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 账户类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "auth.ts")]
pub enum UserType {
    Student,   // 学生
    Professor, // 教师
}

impl UserType {
    pub const STUDENT: &'static str = "student";
    pub const PROFESSOR: &'static str = "professor";
}

impl<'de> Deserialize<'de> for UserType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid user type: '{s}'. Expected one of: student, professor"
            ))
        })
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Student => write!(f, "{}", UserType::STUDENT),
            UserType::Professor => write!(f, "{}", UserType::PROFESSOR),
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" | "estudiante" => Ok(UserType::Student),
            "professor" | "profesor" => Ok(UserType::Professor),
            _ => Err(format!("Invalid user type: {s}")),
        }
    }
}

// 已认证的账户，学生或教师
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "user_type", content = "profile", rename_all = "snake_case")]
#[ts(export, export_to = "auth.ts")]
pub enum AuthUser {
    Student(Student),
    Professor(Professor),
}

impl AuthUser {
    pub fn id(&self) -> i64 {
        match self {
            AuthUser::Student(s) => s.id,
            AuthUser::Professor(p) => p.id,
        }
    }

    pub fn user_type(&self) -> UserType {
        match self {
            AuthUser::Student(_) => UserType::Student,
            AuthUser::Professor(_) => UserType::Professor,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            AuthUser::Student(s) => &s.email,
            AuthUser::Professor(p) => &p.email,
        }
    }

    pub fn full_name(&self) -> String {
        match self {
            AuthUser::Student(s) => s.full_name(),
            AuthUser::Professor(p) => p.full_name(),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            AuthUser::Student(s) => s.active,
            AuthUser::Professor(p) => p.active,
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            AuthUser::Student(s) => &s.password_hash,
            AuthUser::Professor(p) => &p.password_hash,
        }
    }

    pub fn as_professor(&self) -> Option<&Professor> {
        match self {
            AuthUser::Professor(p) => Some(p),
            AuthUser::Student(_) => None,
        }
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(&self) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id(),
            &self.user_type().to_string(),
            None,
        )
        .map_err(|e| format!("Failed to generate token pair: {e}"))
    }
}
