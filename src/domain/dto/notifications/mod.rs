//! 알림 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::notifications::Notification;
use crate::domain::entities::to_chrono_datetime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub title: String,
    pub message: String,
    pub read_status: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: notification.title,
            message: notification.message,
            read_status: notification.read_status,
            created_at: to_chrono_datetime(notification.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub unread: u64,
    pub notifications: Vec<NotificationResponse>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// `true`면 읽지 않은 알림만
    pub unread_only: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct MarkNotificationRequest {
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_notification_response_hides_recipient() {
        let mut notification = Notification::deal_added(ObjectId::new());
        notification.id = Some(ObjectId::new());

        let json = serde_json::to_value(NotificationResponse::from(notification)).unwrap();
        assert!(json.get("recipient_id").is_none());
        assert_eq!(json["read_status"], false);
        assert_eq!(json["message"], "Your deal has been added by an investor.");
    }
}
