use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::auth::entities::UserType;
use crate::services::VideoService;

// 懒加载的全局 VideoService 实例
static VIDEO_SERVICE: Lazy<VideoService> = Lazy::new(VideoService::new_lazy);

pub async fn upload_video(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.upload_video(&request, payload).await
}

// 虚拟教室：按科目分组的公开视频
pub async fn get_classroom(request: HttpRequest) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.get_classroom(&request).await
}

// 配置路由
pub fn configure_video_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/videos")
            .wrap(RateLimit::file_upload())
            .wrap(middlewares::RequireRole::new(UserType::Professor))
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(upload_video)),
    )
    .service(
        web::scope("/api/v1/classroom")
            .wrap(middleware::Compress::default())
            .route("", web::get().to(get_classroom)),
    );
}
