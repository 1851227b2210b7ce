use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RateLimit;
use crate::models::suggestions::SuggestionRequest;
use crate::services::SuggestionService;

// 懒加载的全局 SuggestionService 实例
static SUGGESTION_SERVICE: Lazy<SuggestionService> = Lazy::new(SuggestionService::new_lazy);

pub async fn submit_suggestion(
    req: HttpRequest,
    body: web::Json<SuggestionRequest>,
) -> ActixResult<HttpResponse> {
    SUGGESTION_SERVICE.submit(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_suggestion_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/suggestions")
            .wrap(RateLimit::suggestion())
            .route("", web::post().to(submit_suggestion)),
    );
}
