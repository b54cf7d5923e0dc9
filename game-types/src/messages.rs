use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::user::SYSTEM_USER_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    User,
    System,
}

/// One entry of the chat feed. Entries are never edited once posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub timestamp: String, // ISO 8601 string
    pub is_correct: bool,
}

impl Message {
    pub fn user(
        id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
        timestamp: impl Into<String>,
        is_correct: bool,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            text: text.into(),
            kind: MessageKind::User,
            timestamp: timestamp.into(),
            is_correct,
        }
    }

    pub fn system(id: impl Into<String>, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: SYSTEM_USER_ID.to_string(),
            text: text.into(),
            kind: MessageKind::System,
            timestamp: timestamp.into(),
            is_correct: false,
        }
    }

    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }
}
