use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RateLimit;
use crate::models::chatbot::ChatRequest;
use crate::services::ChatbotService;

// 懒加载的全局 ChatbotService 实例
static CHATBOT_SERVICE: Lazy<ChatbotService> = Lazy::new(ChatbotService::new_lazy);

pub async fn chat(req: HttpRequest, body: web::Json<ChatRequest>) -> ActixResult<HttpResponse> {
    CHATBOT_SERVICE.chat(body.into_inner(), &req).await
}

pub async fn vocabulary(req: HttpRequest) -> ActixResult<HttpResponse> {
    CHATBOT_SERVICE.vocabulary(&req).await
}

// 配置路由
pub fn configure_chatbot_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/maritime-chat")
            .route("", web::post().to(chat).wrap(RateLimit::chatbot()))
            .route("/vocabulary", web::get().to(vocabulary)),
    );
}
