use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfessorService;
use super::qr_token::{ensure_active_token, token_response};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::professors::responses::ProfessorPanelResponse;
use crate::services::{error_response, unauthorized};

// 面板中展示的最近评价条数
const RECENT_EVALUATIONS: u64 = 10;

pub async fn handle_get_panel(
    service: &ProfessorService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(professor) = RequireJWT::extract_professor(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    // 1. 当前二维码令牌，必要时签发
    let token = match ensure_active_token(storage.as_ref(), config, professor.id).await {
        Ok(token) => token,
        Err(e) => return Ok(error_response(&e)),
    };

    // 2. 教师的视频
    let videos = match storage.list_professor_videos(professor.id).await {
        Ok(videos) => videos,
        Err(e) => return Ok(error_response(&e)),
    };

    // 3. 最近的评价与统计
    let recent_evaluations = match storage
        .list_recent_evaluations(professor.id, RECENT_EVALUATIONS)
        .await
    {
        Ok(list) => list,
        Err(e) => return Ok(error_response(&e)),
    };
    let stats = match storage.get_evaluation_stats(professor.id).await {
        Ok(stats) => stats,
        Err(e) => return Ok(error_response(&e)),
    };

    let response = ProfessorPanelResponse {
        professor,
        qr: token_response(config, token),
        videos,
        recent_evaluations,
        stats,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Panel retrieved successfully",
    )))
}

