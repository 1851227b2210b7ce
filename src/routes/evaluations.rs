use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RateLimit;
use crate::models::evaluations::requests::SubmitEvaluationRequest;
use crate::services::EvaluationService;
use crate::utils::SafeQrToken;

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// 扫码打开评价表单（公开）
pub async fn open_form(req: HttpRequest, token: SafeQrToken) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.open_form(&req, token.0).await
}

// 提交评价（公开）
pub async fn submit_evaluation(
    req: HttpRequest,
    body: web::Json<SubmitEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.submit(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(RateLimit::evaluation())
            .route("", web::post().to(submit_evaluation))
            .route("/{token}", web::get().to(open_form)),
    );
}
