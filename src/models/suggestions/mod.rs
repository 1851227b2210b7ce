use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 意见箱
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "suggestion.ts")]
pub struct SuggestionRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "suggestion.ts")]
pub struct SuggestionResponse {
    pub received_at: chrono::DateTime<chrono::Utc>,
}
