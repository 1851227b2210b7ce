use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 委内瑞拉身份证号：可选 V/E 前缀，6 到 10 位数字
static CEDULA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[VvEe]-?)?\d{6,10}$").expect("Invalid cedula regex"));

// 学期编号：YYYY-N
static ACADEMIC_PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:19|20)\d{2}-[1-3]$").expect("Invalid academic period regex"));

pub const MIN_SEMESTER: i32 = 1;
pub const MAX_SEMESTER: i32 = 10;
const MAX_NAME_LENGTH: usize = 100;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_cedula(cedula: &str) -> Result<(), &'static str> {
    if !CEDULA_RE.is_match(cedula) {
        return Err("Cedula must be 6 to 10 digits, optionally prefixed with V- or E-");
    }
    Ok(())
}

pub fn validate_semester(semester: i32) -> Result<(), &'static str> {
    if !(MIN_SEMESTER..=MAX_SEMESTER).contains(&semester) {
        return Err("Semester must be between 1 and 10");
    }
    Ok(())
}

pub fn validate_academic_period(period: &str) -> Result<(), &'static str> {
    if !ACADEMIC_PERIOD_RE.is_match(period) {
        return Err("Academic period must have the form YYYY-N");
    }
    Ok(())
}

/// 姓名、标题等必填文本字段
pub fn validate_required(field: &'static str, value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} is required"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// 规范化身份证号：去掉空白与分隔符，前缀统一大写
pub fn normalize_cedula(cedula: &str) -> String {
    cedula
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect::<String>()
        .to_uppercase()
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = ["password1", "qwerty123", "abcd1234", "umc12345", "marino123"];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("capitan@umc.edu.ve").is_ok());
        assert!(validate_email("capitan@umc").is_err());
        assert!(validate_email("sin-arroba.edu.ve").is_err());
    }

    #[test]
    fn test_cedula() {
        assert!(validate_cedula("V-12345678").is_ok());
        assert!(validate_cedula("e12345678").is_ok());
        assert!(validate_cedula("1234567").is_ok());
        assert!(validate_cedula("V-123").is_err());
        assert!(validate_cedula("X-12345678").is_err());
        assert_eq!(normalize_cedula(" v-12.345.678 "), "V-12345678");
    }

    #[test]
    fn test_semester_bounds() {
        assert!(validate_semester(1).is_ok());
        assert!(validate_semester(10).is_ok());
        assert!(validate_semester(0).is_err());
        assert!(validate_semester(11).is_err());
    }

    #[test]
    fn test_academic_period() {
        assert!(validate_academic_period("2025-1").is_ok());
        assert!(validate_academic_period("2024-3").is_ok());
        assert!(validate_academic_period("2025-4").is_err());
        assert!(validate_academic_period("25-1").is_err());
        assert!(validate_academic_period("2025").is_err());
    }

    #[test]
    fn test_required() {
        assert!(validate_required("title", "Radar ARPA").is_ok());
        assert_eq!(
            validate_required("title", "   ").unwrap_err(),
            "title is required"
        );
        assert!(validate_required("title", &"x".repeat(101)).is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Navegante2025").is_valid);
        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
        let common = validate_password("Qwerty123");
        assert!(
            common
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
