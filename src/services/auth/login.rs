use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        entities::{AuthUser, UserType},
        requests::LoginRequest,
        responses::LoginResponse,
    },
};
use crate::services::error_response;
use crate::utils::jwt::{self, JwtUtils};
use crate::utils::password::verify_password;

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Email or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let email = login_request.email.trim().to_lowercase();

    // 1. 按账户类型到对应的表中查找
    let lookup = match login_request.user_type {
        UserType::Student => storage
            .get_student_by_email(&email)
            .await
            .map(|s| s.map(AuthUser::Student)),
        UserType::Professor => storage
            .get_professor_by_email(&email)
            .await
            .map(|p| p.map(AuthUser::Professor)),
    };

    let user = match lookup {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(invalid_credentials()),
        Err(e) => return Ok(error_response(&e)),
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, user.password_hash()) {
        return Ok(invalid_credentials());
    }

    // 3. 停用的账户不允许登录
    if !user.is_active() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountInactive,
            "Account is not active",
        )));
    }

    // 4. 生成令牌对
    match user.generate_token_pair() {
        Ok(token_pair) => {
            tracing::info!("{} {} logged in successfully", user.user_type(), user.id());

            let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: jwt::JwtUtils::access_token_ttl_secs(),
                user,
            };

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::services::auth::tests::{body_json, service_with};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, professor_request};
    use crate::utils::password::hash_password;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use std::sync::Arc;

    const PASSWORD: &str = "Estribor2025";

    fn student(cedula: &str, email: &str, active: bool) -> CreateStudentRequest {
        CreateStudentRequest {
            cedula: cedula.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Torres".to_string(),
            email: email.to_string(),
            phone: None,
            birth_date: None,
            address: None,
            semester: 2,
            password_hash: hash_password(PASSWORD).unwrap(),
            active,
        }
    }

    fn login(email: &str, password: &str, user_type: UserType) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            user_type,
        }
    }

    async fn setup() -> AuthService {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_student(student("V-20111222", "ana@umc.edu.ve", true))
            .await
            .unwrap();
        storage
            .create_student(student("V-20111333", "inactiva@umc.edu.ve", false))
            .await
            .unwrap();
        service_with(Arc::new(storage))
    }

    #[tokio::test]
    async fn test_login_success_sets_refresh_cookie() {
        let service = setup().await;
        let req = actix_test::TestRequest::default().to_http_request();

        let resp = handle_login(&service, login(" ANA@umc.edu.ve", PASSWORD, UserType::Student), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.cookies()
                .any(|c| c.name() == jwt::REFRESH_TOKEN_COOKIE)
        );
        let body = body_json(resp).await;
        let access = body["data"]["access_token"].as_str().unwrap();
        let claims = JwtUtils::verify_access_token(access).unwrap();
        assert_eq!(claims.user_type(), Some(UserType::Student));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_type() {
        let service = setup().await;
        let req = actix_test::TestRequest::default().to_http_request();

        let resp = handle_login(&service, login("ana@umc.edu.ve", "Otra2025x", UserType::Student), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["code"], ErrorCode::AuthFailed as i32);

        // 学生账户不能以教师身份登录
        let resp = handle_login(&service, login("ana@umc.edu.ve", PASSWORD, UserType::Professor), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_inactive_account_cannot_login() {
        let service = setup().await;
        let req = actix_test::TestRequest::default().to_http_request();

        let resp = handle_login(&service, login("inactiva@umc.edu.ve", PASSWORD, UserType::Student), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(resp).await["code"], ErrorCode::AccountInactive as i32);

        // 密码错误时不透露账户状态
        let resp = handle_login(&service, login("inactiva@umc.edu.ve", "Otra2025x", UserType::Student), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_inactive_professor_cannot_login() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let mut request = professor_request("V-8000001", "Mario", "Díaz", false);
        request.password_hash = hash_password(PASSWORD).unwrap();
        storage.create_professor(request).await.unwrap();
        let service = service_with(Arc::new(storage));
        let req = actix_test::TestRequest::default().to_http_request();

        let resp = handle_login(&service, login("v-8000001@umc.edu.ve", PASSWORD, UserType::Professor), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
