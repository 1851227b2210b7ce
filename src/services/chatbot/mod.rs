pub mod glossary;
pub mod reply;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::chatbot::{ChatReply, ChatRequest};

// 单条消息的最大字符数
const MAX_MESSAGE_CHARS: usize = 2000;

pub struct ChatbotService;

impl ChatbotService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 术语问答，响应体为 {response} 或 {error}
    pub async fn chat(
        &self,
        chat_request: ChatRequest,
        _request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let message = chat_request.message.trim();
        if message.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ChatReply::Error {
                error: "Mensaje vacío".to_string(),
            }));
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Ok(HttpResponse::BadRequest().json(ChatReply::Error {
                error: format!("El mensaje no puede superar {MAX_MESSAGE_CHARS} caracteres"),
            }));
        }

        tracing::debug!("Maritime chat query: {}", message);
        Ok(HttpResponse::Ok().json(ChatReply::Response {
            response: reply::answer(message),
        }))
    }

    // 基础词汇表
    pub async fn vocabulary(&self, _request: &HttpRequest) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(ChatReply::Response {
            response: glossary::vocabulary_table(),
        }))
    }
}
