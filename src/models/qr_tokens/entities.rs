use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师评价二维码令牌
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "qr_token.ts")]
pub struct QrToken {
    pub id: i64,
    pub professor_id: i64,
    pub token: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub active: bool,
    pub uses: i32,
}

impl QrToken {
    /// 令牌有效：处于激活状态且未过期
    pub fn is_valid_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.active && self.expires_at.is_none_or(|exp| exp > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn token(active: bool, expires_at: Option<chrono::DateTime<Utc>>) -> QrToken {
        QrToken {
            id: 1,
            professor_id: 1,
            token: "abc".into(),
            created_at: Utc::now(),
            expires_at,
            active,
            uses: 0,
        }
    }

    #[test]
    fn test_token_validity() {
        let now = Utc::now();
        assert!(token(true, None).is_valid_at(now));
        assert!(token(true, Some(now + Duration::days(1))).is_valid_at(now));
        assert!(!token(true, Some(now - Duration::seconds(1))).is_valid_at(now));
        assert!(!token(false, None).is_valid_at(now));
    }
}
