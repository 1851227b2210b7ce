pub mod panel;
pub mod qr_token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::Storage;

pub struct ProfessorService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfessorService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 教师面板
    pub async fn get_panel(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        panel::handle_get_panel(self, request).await
    }

    // 轮换评价二维码
    pub async fn rotate_qr_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        qr_token::handle_rotate(self, request).await
    }
}
