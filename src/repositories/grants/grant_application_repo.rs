//! 지원금 신청서 리포지토리
//!
//! `(grant_id, founder_id)` 유니크 인덱스로 창업자당 공고 하나에 한 번만 신청할 수 있습니다.

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
    domain::entities::grants::GrantApplication,
    repositories::map_write_error,
};

#[repository(name = "grantapplication", collection = "grant_applications")]
pub struct GrantApplicationRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl GrantApplicationRepository {
    pub async fn create(&self, mut application: GrantApplication) -> Result<GrantApplication, AppError> {
        let result = self.collection::<GrantApplication>()
            .insert_one(&application)
            .await
            .map_err(|e| map_write_error(e, "이미 신청한 지원금입니다"))?;

        application.id = result.inserted_id.as_object_id();
        Ok(application)
    }

    pub async fn exists_for(&self, grant_id: &ObjectId, founder_id: &ObjectId) -> Result<bool, AppError> {
        let count = self.collection::<GrantApplication>()
            .count_documents(doc! { "grant_id": grant_id, "founder_id": founder_id })
            .await?;
        Ok(count > 0)
    }

    pub async fn find_by_founder(&self, founder_id: &ObjectId) -> Result<Vec<GrantApplication>, AppError> {
        let applications = self.collection::<GrantApplication>()
            .find(doc! { "founder_id": founder_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(applications)
    }

    pub async fn find_by_grant(&self, grant_id: &ObjectId) -> Result<Vec<GrantApplication>, AppError> {
        let applications = self.collection::<GrantApplication>()
            .find(doc! { "grant_id": grant_id })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(applications)
    }

    /// 심사 결과 반영 (`changes`에 `updated_at` 추가)
    pub async fn apply_review(
        &self,
        id: &ObjectId,
        grant_id: &ObjectId,
        mut changes: Document,
    ) -> Result<Option<GrantApplication>, AppError> {
        changes.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self.collection::<GrantApplication>()
            .find_one_and_update(
                doc! { "_id": id, "grant_id": grant_id },
                doc! { "$set": changes },
            )
            .with_options(options)
            .await?)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "grant_id": 1, "founder_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("grant_founder_unique".to_string())
                .build())
            .build();

        self.collection::<GrantApplication>()
            .create_indexes([pair_index])
            .await?;

        Ok(())
    }
}
