use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 海事术语问答请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "chatbot.ts")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

// 成功时返回 {response}，失败时返回 {error}
#[derive(Debug, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "chatbot.ts")]
pub enum ChatReply {
    Response { response: String },
    Error { error: String },
}

// 术语表中的一个条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "chatbot.ts")]
pub struct GlossaryEntry {
    pub spanish: String,
    pub english: String,
    pub french: String,
    pub german: String,
    pub mandarin: String,
    pub definition: String,
}
