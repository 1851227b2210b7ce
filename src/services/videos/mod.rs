pub mod classroom;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::Storage;

pub struct VideoService {
    storage: Option<Arc<dyn Storage>>,
}

impl VideoService {
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

    // 上传课堂视频
    pub async fn upload_video(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload_video(self, request, payload).await
    }

    // 虚拟课堂
    pub async fn get_classroom(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        classroom::handle_get_classroom(self, request).await
    }
}
