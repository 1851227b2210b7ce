use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::auth::requests::LoginRequest;
use crate::models::professors::requests::RegisterProfessorRequest;
use crate::models::students::requests::RegisterStudentRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn register_student(
    req: HttpRequest,
    body: web::Json<RegisterStudentRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register_student(body.into_inner(), &req).await
}

pub async fn register_professor(
    req: HttpRequest,
    body: web::Json<RegisterProfessorRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register_professor(body.into_inner(), &req).await
}

pub async fn login(
    req: HttpRequest,
    body: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(body.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::scope("/register")
                    .wrap(RateLimit::register())
                    .route("/student", web::post().to(register_student))
                    .route("/professor", web::post().to(register_professor)),
            )
            .route(
                "/login",
                web::post().to(login).wrap(RateLimit::login()),
            )
            .route(
                "/refresh",
                web::post().to(refresh_token).wrap(RateLimit::refresh_token()),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/me", web::get().to(get_user)),
            ),
    );
}
