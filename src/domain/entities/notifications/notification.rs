//! 사용자 알림
//!
//! 딜/미팅 이벤트로 생성되며 수신자만 읽음 처리하거나 삭제할 수 있습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// 수신자 사용자 ID (창업자 또는 투자자)
    pub recipient_id: ObjectId,

    pub title: String,

    pub message: String,

    #[serde(default)]
    pub read_status: bool,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

impl Notification {
    pub fn new(recipient_id: ObjectId, title: impl Into<String>, message: impl Into<String>) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            recipient_id,
            title: title.into(),
            message: message.into(),
            read_status: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// 투자자가 딜 플로우에 추가했을 때 창업자에게 보내는 알림
    pub fn deal_added(founder_id: ObjectId) -> Self {
        Self::new(founder_id, "New deal", "Your deal has been added by an investor.")
    }

    pub fn meeting_scheduled(founder_id: ObjectId, title: &str) -> Self {
        Self::new(founder_id, "Meeting scheduled", format!("An investor scheduled a meeting: {}", title))
    }
}
