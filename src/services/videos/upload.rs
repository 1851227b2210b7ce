use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VideoService;
use crate::middlewares::RequireJWT;
use crate::models::videos::requests::CreateVideoRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::uploads::{MultipartForm, UploadRules, read_multipart};
use crate::services::{bad_request, error_response, unauthorized};
use crate::utils::validate::{validate_required, validate_semester};

/// 由表单构建视频记录，professor_id 由调用方填入
fn build_video(form: &MultipartForm, professor_id: i64) -> Result<CreateVideoRequest, String> {
    let title = form.text("title").unwrap_or_default();
    let subject = form.text("subject").unwrap_or_default();
    validate_required("title", &title)?;
    validate_required("subject", &subject)?;

    let semester = form.int("semester")?;
    if let Some(s) = semester {
        validate_semester(s)?;
    }
    let duration_minutes = form.int("duration_minutes")?;
    if duration_minutes.is_some_and(|d| d <= 0) {
        return Err("duration_minutes must be positive".to_string());
    }

    let video_url = form.text("video_url");
    if let Some(url) = &video_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err("video_url must be an http(s) URL".to_string());
    }

    let video_file = form.file.as_ref().map(|f| f.stored_name.clone());
    if video_file.is_none() && video_url.is_none() {
        return Err("Either a video file or a video URL is required".to_string());
    }

    Ok(CreateVideoRequest {
        professor_id,
        title,
        description: form.text("description"),
        subject,
        semester,
        video_file,
        video_url,
        duration_minutes,
    })
}

pub async fn handle_upload_video(
    service: &VideoService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let Some(professor) = RequireJWT::extract_professor(request) else {
        return Ok(unauthorized());
    };
    let config = service.get_config();

    let rules = UploadRules {
        file_field: "video_file",
        allowed_types: &config.upload.video_types,
        max_size: config.upload.max_video_size,
        upload_dir: &config.upload.dir,
    };
    let form = match read_multipart(payload, &rules).await {
        Ok(form) => form,
        Err(response) => return Ok(response),
    };

    let video = match build_video(&form, professor.id) {
        Ok(video) => video,
        Err(msg) => {
            form.discard_file();
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
    };

    let storage = service.get_storage(request)?;
    match storage.create_video(video).await {
        Ok(video) => {
            tracing::info!("Professor {} uploaded video {}", professor.id, video.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                video,
                "Video uploaded successfully",
            )))
        }
        Err(e) => {
            form.discard_file();
            Ok(error_response(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> MultipartForm {
        let mut form = MultipartForm::default();
        for (k, v) in pairs {
            form.fields.insert(k.to_string(), v.to_string());
        }
        form
    }

    #[test]
    fn test_video_requires_file_or_url() {
        let err = build_video(&form(&[("title", "Radar"), ("subject", "Navegación")]), 1)
            .unwrap_err();
        assert!(err.contains("video file or a video URL"));

        let ok = build_video(
            &form(&[
                ("title", "Radar ARPA"),
                ("subject", "Navegación"),
                ("semester", "3"),
                ("video_url", "https://videos.umc.edu.ve/arpa"),
                ("duration_minutes", "45"),
            ]),
            7,
        )
        .unwrap();
        assert_eq!(ok.professor_id, 7);
        assert_eq!(ok.semester, Some(3));
        assert_eq!(ok.duration_minutes, Some(45));
        assert!(ok.video_file.is_none());
    }

    #[test]
    fn test_video_field_validation() {
        assert!(build_video(&form(&[("subject", "Radar")]), 1).is_err());
        let bad_semester = form(&[
            ("title", "Radar"),
            ("subject", "Navegación"),
            ("semester", "12"),
            ("video_url", "https://x.y/z"),
        ]);
        assert!(build_video(&bad_semester, 1).is_err());
        let bad_url = form(&[
            ("title", "Radar"),
            ("subject", "Navegación"),
            ("video_url", "javascript:alert(1)"),
        ]);
        assert!(build_video(&bad_url, 1).is_err());
    }
}
