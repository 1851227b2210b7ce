use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use super::open::resolve_token;
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::evaluations::requests::{CreateEvaluationRequest, SubmitEvaluationRequest};
use crate::models::evaluations::responses::EvaluationSubmittedResponse;
use crate::models::students::entities::Student;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::password::random_password_hash;
use crate::utils::validate::{
    normalize_cedula, validate_academic_period, validate_cedula, validate_required,
    validate_semester,
};

/// 按身份证号查找学生，不存在时建立一个仅用于评价的占位学生
async fn find_or_create_student(
    storage: &dyn Storage,
    cedula: &str,
    full_name: &str,
    semester: i32,
) -> Result<Student> {
    if let Some(student) = storage.get_student_by_cedula(cedula).await? {
        return Ok(student);
    }

    let mut words = full_name.split_whitespace();
    let first_name = words.next().unwrap_or_default().to_string();
    let last_name = words.collect::<Vec<_>>().join(" ");

    let placeholder = CreateStudentRequest {
        cedula: cedula.to_string(),
        first_name,
        last_name,
        email: format!("temp_{}@temp.umc.edu.ve", cedula.to_lowercase()),
        phone: None,
        birth_date: None,
        address: None,
        semester,
        password_hash: random_password_hash()?,
        active: false,
    };

    match storage.create_student(placeholder).await {
        Ok(student) => {
            tracing::info!("Created placeholder student {} for evaluation", student.id);
            Ok(student)
        }
        // 并发提交时另一请求可能已经建好
        Err(PortalError::Conflict(msg)) => storage
            .get_student_by_cedula(cedula)
            .await?
            .ok_or(PortalError::Conflict(msg)),
        Err(e) => Err(e),
    }
}

pub(crate) async fn submit_evaluation(
    storage: &dyn Storage,
    config: &AppConfig,
    req: SubmitEvaluationRequest,
) -> Result<EvaluationSubmittedResponse> {
    // 1. 令牌
    let (_, professor) = resolve_token(storage, &req.token).await?;

    // 2. 表单内容
    let bounds = (config.evaluation.min_rating, config.evaluation.max_rating);
    if let Some(field) = req.ratings.first_out_of_range(bounds.0, bounds.1) {
        return Err(PortalError::validation(format!(
            "{field} must be between {} and {}",
            bounds.0, bounds.1
        )));
    }
    let cedula = normalize_cedula(&req.student_cedula);
    let period = req.academic_period.trim().to_string();
    validate_cedula(&cedula).map_err(PortalError::validation)?;
    validate_required("student_name", &req.student_name).map_err(PortalError::validation)?;
    validate_semester(req.semester).map_err(PortalError::validation)?;
    validate_academic_period(&period).map_err(PortalError::validation)?;

    // 3. 学生
    let student =
        find_or_create_student(storage, &cedula, req.student_name.trim(), req.semester).await?;

    // 4. 同一学期只能评价一次
    if storage
        .find_evaluation(student.id, professor.id, &period)
        .await?
        .is_some()
    {
        return Err(PortalError::conflict(
            "This professor has already been evaluated by this student in this period",
        ));
    }

    let evaluation = storage
        .create_evaluation(CreateEvaluationRequest {
            student_id: student.id,
            professor_id: professor.id,
            ratings: req.ratings,
            positive_aspects: non_empty(req.positive_aspects),
            improvement_aspects: non_empty(req.improvement_aspects),
            general_comments: non_empty(req.general_comments),
            recommendation: req.recommendation,
            semester: req.semester,
            academic_period: period,
        })
        .await?;

    tracing::info!(
        "Evaluation {} submitted for professor {}",
        evaluation.id,
        professor.id
    );

    Ok(EvaluationSubmittedResponse {
        evaluation_id: evaluation.id,
        professor_name: professor.full_name(),
        average: evaluation.average,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub async fn handle_submit(
    service: &EvaluationService,
    submit_request: SubmitEvaluationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match submit_evaluation(storage.as_ref(), service.get_config(), submit_request).await {
        Ok(submitted) => Ok(HttpResponse::Created().json(ApiResponse::success(
            submitted,
            "Evaluation submitted successfully, thank you for your feedback",
        ))),
        Err(PortalError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::QrTokenInvalid, msg))),
        Err(PortalError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::EvaluationInvalid, msg))),
        Err(PortalError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::EvaluationAlreadySubmitted,
                "This professor has already been evaluated by this student in this period",
            ),
        )),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::{Ratings, Recommendation};
    use crate::storage::sea_orm_storage::{SeaOrmStorage, professor_request};

    const TOKEN: &str = "2b1f0d4e-1111-4000-8000-00000000abcd";

    async fn setup() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let p = storage
            .create_professor(professor_request("V-8000001", "Mario", "Díaz", true))
            .await
            .unwrap();
        storage.create_qr_token(p.id, TOKEN, None).await.unwrap();
        (storage, p.id)
    }

    fn request(cedula: &str, period: &str, rating: i32) -> SubmitEvaluationRequest {
        SubmitEvaluationRequest {
            token: TOKEN.to_string(),
            student_cedula: cedula.to_string(),
            student_name: "  Ana María  Torres ".to_string(),
            semester: 4,
            academic_period: period.to_string(),
            ratings: Ratings {
                subject_mastery: rating,
                explanation_clarity: rating,
                punctuality: rating,
                availability: rating,
                methodology: rating,
                overall: 4,
            },
            positive_aspects: Some("Puntual".to_string()),
            improvement_aspects: Some("   ".to_string()),
            general_comments: None,
            recommendation: Recommendation::Yes,
        }
    }

    #[tokio::test]
    async fn test_submit_creates_placeholder_student() {
        let (storage, pid) = setup().await;
        let config = AppConfig::get();

        let resp = submit_evaluation(&storage, config, request("v-20.111.222", "2025-1", 5))
            .await
            .unwrap();
        assert_eq!(resp.professor_name, "Mario Díaz");
        assert_eq!(resp.average, 4.83);

        let student = storage
            .get_student_by_cedula("V-20111222")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.first_name, "Ana");
        assert_eq!(student.last_name, "María Torres");
        assert_eq!(student.email, "temp_v-20111222@temp.umc.edu.ve");
        assert!(!student.active);

        let recent = storage.list_recent_evaluations(pid, 10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert!(recent[0].improvement_aspects.is_none());
    }

    #[tokio::test]
    async fn test_second_submission_in_period_conflicts() {
        let (storage, _) = setup().await;
        let config = AppConfig::get();

        submit_evaluation(&storage, config, request("V-20111222", "2025-1", 5))
            .await
            .unwrap();
        let err = submit_evaluation(&storage, config, request("V-20111222", "2025-1", 3))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Conflict(_)));

        // 学生已存在，换学期可以再次评价
        submit_evaluation(&storage, config, request("V-20111222", "2025-2", 3))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_submit_validation() {
        let (storage, _) = setup().await;
        let config = AppConfig::get();

        let err = submit_evaluation(&storage, config, request("V-20111222", "2025-1", 9))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Validation(ref m) if m.contains("subject_mastery")));

        let err = submit_evaluation(&storage, config, request("V-20111222", "25-1", 5))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Validation(_)));

        let mut bad_token = request("V-20111222", "2025-1", 5);
        bad_token.token = "nope".to_string();
        let err = submit_evaluation(&storage, config, bad_token)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
