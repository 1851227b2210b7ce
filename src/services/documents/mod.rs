pub mod download;
pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::documents::requests::DocumentListParams;
use crate::storage::Storage;

pub struct DocumentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DocumentService {
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

    // 文档列表
    pub async fn list_documents(
        &self,
        request: &HttpRequest,
        params: DocumentListParams,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_documents(self, request, params).await
    }

    // 上传文档
    pub async fn upload_document(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload_document(self, request, payload).await
    }

    // 下载文档
    pub async fn download_document(
        &self,
        request: &HttpRequest,
        document_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::handle_download_document(self, request, document_id).await
    }
}
