use super::entities::Video;
use serde::Serialize;
use ts_rs::TS;

// 按科目分组的视频
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "video.ts")]
pub struct SubjectVideos {
    pub subject: String,
    pub videos: Vec<Video>,
}

// 虚拟课堂
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "video.ts")]
pub struct ClassroomResponse {
    pub total: usize,
    pub subjects: Vec<SubjectVideos>,
}

impl ClassroomResponse {
    /// 按科目分组，组的顺序按科目首次出现的位置，组内保持原有顺序
    pub fn group_by_subject(videos: Vec<Video>) -> Self {
        let total = videos.len();
        let mut subjects: Vec<SubjectVideos> = Vec::new();
        for video in videos {
            match subjects.iter_mut().find(|g| g.subject == video.subject) {
                Some(group) => group.videos.push(video),
                None => subjects.push(SubjectVideos {
                    subject: video.subject.clone(),
                    videos: vec![video],
                }),
            }
        }
        Self { total, subjects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: i64, subject: &str) -> Video {
        Video {
            id,
            professor_id: 1,
            professor_name: None,
            title: format!("Clase {id}"),
            description: None,
            subject: subject.to_string(),
            semester: None,
            video_file: None,
            video_url: Some("https://videos.umc.edu.ve/x".into()),
            duration_minutes: None,
            uploaded_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_group_by_subject_keeps_order() {
        let resp = ClassroomResponse::group_by_subject(vec![
            video(5, "Radar"),
            video(4, "Meteorología"),
            video(3, "Radar"),
        ]);
        assert_eq!(resp.total, 3);
        assert_eq!(resp.subjects.len(), 2);
        assert_eq!(resp.subjects[0].subject, "Radar");
        let ids: Vec<i64> = resp.subjects[0].videos.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![5, 3]);
        assert_eq!(resp.subjects[1].subject, "Meteorología");
    }
}
