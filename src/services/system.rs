use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::config::AppConfig;
use crate::models::system::SystemInfoResponse;
use crate::models::{ApiResponse, AppStartTime};
use crate::services::{error_response, storage_from_request};

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 公开系统信息
    pub async fn get_info(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let config = self.get_config();
        let storage = storage_from_request(request)?;

        let students = match storage.count_students().await {
            Ok(n) => n,
            Err(e) => return Ok(error_response(&e)),
        };
        let professors = match storage.count_professors().await {
            Ok(n) => n,
            Err(e) => return Ok(error_response(&e)),
        };
        let uptime_seconds = request
            .app_data::<web::Data<AppStartTime>>()
            .map(|start| {
                chrono::Utc::now()
                    .signed_duration_since(start.start_datetime)
                    .num_seconds()
            })
            .unwrap_or_default();

        let response = SystemInfoResponse {
            system_name: config.app.system_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: config.app.environment.clone(),
            uptime_seconds,
            students,
            professors,
            max_document_size: config.upload.max_document_size,
            max_video_size: config.upload.max_video_size,
            document_types: config.upload.document_types.clone(),
            video_types: config.upload.video_types.clone(),
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "System information retrieved successfully",
        )))
    }
}
