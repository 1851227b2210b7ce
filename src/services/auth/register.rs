use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AuthService;
use crate::errors::PortalError;
use crate::models::professors::requests::{CreateProfessorRequest, RegisterProfessorRequest};
use crate::models::students::requests::{CreateStudentRequest, RegisterStudentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    normalize_cedula, validate_cedula, validate_email, validate_password_simple,
    validate_required, validate_semester,
};

/// 学生与教师共用的字段校验，返回规范化后的 (身份证号, 邮箱)
fn validate_identity(
    cedula: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<(String, String), HttpResponse> {
    let cedula = normalize_cedula(cedula);
    let email = email.trim().to_lowercase();

    for (field, value) in [("first_name", first_name), ("last_name", last_name)] {
        validate_required(field, value).map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;
    }
    validate_cedula(&cedula).map_err(|msg| bad_request(ErrorCode::BadRequest, msg))?;
    validate_email(&email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    validate_password_simple(password)
        .map_err(|msg| bad_request(ErrorCode::UserPasswordInvalid, msg))?;

    Ok((cedula, email))
}

fn already_exists() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::UserAlreadyExists,
        "An account with this email or cedula already exists",
    ))
}

fn register_failed(err: PortalError) -> HttpResponse {
    match err {
        PortalError::Conflict(_) => already_exists(),
        other => error_response(&other),
    }
}

async fn check_student_exists(
    storage: &Arc<dyn Storage>,
    email: &str,
    cedula: &str,
) -> Result<(), HttpResponse> {
    match storage.find_student_by_email_or_cedula(email, cedula).await {
        Ok(Some(_)) => Err(already_exists()),
        Ok(None) => Ok(()),
        Err(e) => Err(error_response(&e)),
    }
}

async fn check_professor_exists(
    storage: &Arc<dyn Storage>,
    email: &str,
    cedula: &str,
) -> Result<(), HttpResponse> {
    match storage.find_professor_by_email_or_cedula(email, cedula).await {
        Ok(Some(_)) => Err(already_exists()),
        Ok(None) => Ok(()),
        Err(e) => Err(error_response(&e)),
    }
}

pub async fn handle_register_student(
    service: &AuthService,
    register_request: RegisterStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 1. 字段校验
    let (cedula, email) = match validate_identity(
        &register_request.cedula,
        &register_request.first_name,
        &register_request.last_name,
        &register_request.email,
        &register_request.password,
    ) {
        Ok(v) => v,
        Err(response) => return Ok(response),
    };
    if let Err(msg) = validate_semester(register_request.semester) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    let birth_date = match register_request.birth_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                return Ok(bad_request(
                    ErrorCode::BadRequest,
                    "birth_date must have the form YYYY-MM-DD",
                ));
            }
        },
    };

    // 2. 检查邮箱或身份证号是否已注册
    if let Err(response) = check_student_exists(&storage, &email, &cedula).await {
        return Ok(response);
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response(&e)),
    };

    // 4. 创建学生
    let create_request = CreateStudentRequest {
        cedula,
        first_name: register_request.first_name.trim().to_string(),
        last_name: register_request.last_name.trim().to_string(),
        email,
        phone: register_request.phone,
        birth_date,
        address: register_request.address,
        semester: register_request.semester,
        password_hash,
        active: true,
    };

    match storage.create_student(create_request).await {
        Ok(student) => {
            tracing::info!("Student {} registered", student.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student registered successfully",
            )))
        }
        Err(e) => Ok(register_failed(e)),
    }
}

pub async fn handle_register_professor(
    service: &AuthService,
    register_request: RegisterProfessorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 1. 字段校验
    let (cedula, email) = match validate_identity(
        &register_request.cedula,
        &register_request.first_name,
        &register_request.last_name,
        &register_request.email,
        &register_request.password,
    ) {
        Ok(v) => v,
        Err(response) => return Ok(response),
    };
    if let Err(msg) = validate_required("department", &register_request.department) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    if register_request.subjects.is_empty() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "At least one subject is required",
        ));
    }
    if register_request.experience_years.is_some_and(|y| y < 0) {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "experience_years must not be negative",
        ));
    }

    // 2. 检查邮箱或身份证号是否已注册
    if let Err(response) = check_professor_exists(&storage, &email, &cedula).await {
        return Ok(response);
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response(&e)),
    };

    // 4. 创建教师
    let create_request = CreateProfessorRequest {
        cedula,
        first_name: register_request.first_name.trim().to_string(),
        last_name: register_request.last_name.trim().to_string(),
        email,
        phone: register_request.phone,
        department: register_request.department.trim().to_string(),
        subjects: register_request.subjects,
        experience_years: register_request.experience_years,
        academic_title: register_request.academic_title,
        password_hash,
        active: true,
    };

    match storage.create_professor(create_request).await {
        Ok(professor) => {
            tracing::info!("Professor {} registered", professor.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                professor,
                "Professor registered successfully",
            )))
        }
        Err(e) => Ok(register_failed(e)),
    }
}
