use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::UserType;
use crate::services::ProfessorService;

// 懒加载的全局 ProfessorService 实例
static PROFESSOR_SERVICE: Lazy<ProfessorService> = Lazy::new(ProfessorService::new_lazy);

// 教师面板：二维码、视频、最近评价与统计
pub async fn get_panel(request: HttpRequest) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE.get_panel(&request).await
}

// 作废旧令牌并生成新的评价二维码
pub async fn rotate_qr_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE.rotate_qr_token(&request).await
}

// 配置路由
pub fn configure_professor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/professors/me")
            .wrap(middlewares::RequireRole::new(UserType::Professor))
            .wrap(middlewares::RequireJWT)
            .route("/panel", web::get().to(get_panel))
            .route("/qr-token/rotate", web::post().to(rotate_qr_token)),
    );
}
