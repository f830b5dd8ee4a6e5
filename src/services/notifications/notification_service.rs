//! 수신자 범위의 알림 조회와 상태 변경
//!
//! 다른 사용자의 알림은 존재 여부와 관계없이 `NotFound`로 응답합니다.

use std::sync::Arc;

use futures_util::future::try_join;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;

use crate::{
    core::errors::AppError,
    domain::dto::notifications::{NotificationListResponse, NotificationResponse},
    repositories::notifications::NotificationRepository,
};

#[service(name = "notification")]
pub struct NotificationService {
    notification_repo: Arc<NotificationRepository>,
}

fn not_found() -> AppError {
    AppError::NotFound("알림을 찾을 수 없습니다".to_string())
}

impl NotificationService {
    pub async fn list(&self, recipient_id: &ObjectId, unread_only: bool) -> Result<NotificationListResponse, AppError> {
        let (notifications, unread) = try_join(
            self.notification_repo.find_for_recipient(recipient_id, unread_only),
            self.notification_repo.count_unread(recipient_id),
        )
        .await?;

        Ok(NotificationListResponse {
            unread,
            notifications: notifications.into_iter().map(NotificationResponse::from).collect(),
        })
    }

    pub async fn mark(&self, id: &ObjectId, recipient_id: &ObjectId, read: bool) -> Result<NotificationResponse, AppError> {
        self.notification_repo
            .set_read(id, recipient_id, read)
            .await?
            .map(NotificationResponse::from)
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, id: &ObjectId, recipient_id: &ObjectId) -> Result<(), AppError> {
        if self.notification_repo.delete(id, recipient_id).await? {
            Ok(())
        } else {
            Err(not_found())
        }
    }
}
