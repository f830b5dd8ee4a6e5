//! 지원금 공고 리포지토리

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::grants::Grant,
};

#[repository(name = "grant", collection = "grants")]
pub struct GrantRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl GrantRepository {
    pub async fn create(&self, mut grant: Grant) -> Result<Grant, AppError> {
        let result = self.collection::<Grant>()
            .insert_one(&grant)
            .await?;

        grant.id = result.inserted_id.as_object_id();
        Ok(grant)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Grant>, AppError> {
        Ok(self.collection::<Grant>()
            .find_one(doc! { "_id": id })
            .await?)
    }

    /// 마감일 오름차순 목록
    pub async fn find_matching(&self, filter: Document) -> Result<Vec<Grant>, AppError> {
        let grants = self.collection::<Grant>()
            .find(filter)
            .sort(doc! { "deadline": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(grants)
    }

    pub async fn update(&self, id: &ObjectId, mut changes: Document) -> Result<Option<Grant>, AppError> {
        changes.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self.collection::<Grant>()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": changes })
            .with_options(options)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Grant>()
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let listing_index = IndexModel::builder()
            .keys(doc! { "category": 1, "region": 1, "deadline": 1 })
            .options(IndexOptions::builder()
                .name("category_region_deadline".to_string())
                .build())
            .build();

        self.collection::<Grant>()
            .create_indexes([listing_index])
            .await?;

        Ok(())
    }
}
