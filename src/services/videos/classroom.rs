use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VideoService;
use crate::models::ApiResponse;
use crate::models::videos::responses::ClassroomResponse;
use crate::services::error_response;

pub async fn handle_get_classroom(
    service: &VideoService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_active_videos().await {
        Ok(videos) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassroomResponse::group_by_subject(videos),
            "Classroom retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
