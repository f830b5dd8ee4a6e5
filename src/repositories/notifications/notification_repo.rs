//! 알림 리포지토리
//!
//! 모든 조회와 변경은 수신자 ID로 한정됩니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::notifications::Notification,
};

#[repository(name = "notification", collection = "notifications")]
pub struct NotificationRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl NotificationRepository {
    pub async fn insert(&self, notification: &Notification) -> Result<(), AppError> {
        self.collection::<Notification>()
            .insert_one(notification)
            .await?;
        Ok(())
    }

    /// 최신순 목록
    pub async fn find_for_recipient(
        &self,
        recipient_id: &ObjectId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        let mut filter = doc! { "recipient_id": recipient_id };
        if unread_only {
            filter.insert("read_status", false);
        }

        let notifications = self.collection::<Notification>()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(notifications)
    }

    pub async fn count_unread(&self, recipient_id: &ObjectId) -> Result<u64, AppError> {
        Ok(self.collection::<Notification>()
            .count_documents(doc! { "recipient_id": recipient_id, "read_status": false })
            .await?)
    }

    pub async fn set_read(
        &self,
        id: &ObjectId,
        recipient_id: &ObjectId,
        read: bool,
    ) -> Result<Option<Notification>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self.collection::<Notification>()
            .find_one_and_update(
                doc! { "_id": id, "recipient_id": recipient_id },
                doc! { "$set": { "read_status": read, "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId, recipient_id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Notification>()
            .delete_one(doc! { "_id": id, "recipient_id": recipient_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let recipient_index = IndexModel::builder()
            .keys(doc! { "recipient_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("recipient_created_desc".to_string())
                .build())
            .build();

        self.collection::<Notification>()
            .create_indexes([recipient_index])
            .await?;

        Ok(())
    }
}
