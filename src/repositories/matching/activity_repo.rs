//! 투자자 활동 로그 리포지토리 (추가 전용)

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    ClientSession, IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::matching::Activity,
};

#[repository(name = "activity", collection = "activities")]
pub struct ActivityRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl ActivityRepository {
    pub async fn insert(&self, activity: &Activity) -> Result<(), AppError> {
        self.collection::<Activity>()
            .insert_one(activity)
            .await?;
        Ok(())
    }

    /// 트랜잭션에 포함되는 기록
    pub async fn insert_in(&self, activity: &Activity, session: &mut ClientSession) -> Result<(), AppError> {
        self.collection::<Activity>()
            .insert_one(activity)
            .session(&mut *session)
            .await?;
        Ok(())
    }

    /// 최근 활동 (날짜 내림차순)
    pub async fn recent(&self, investor_id: &ObjectId, limit: i64) -> Result<Vec<Activity>, AppError> {
        let activities = self.collection::<Activity>()
            .find(doc! { "investor_id": investor_id })
            .sort(doc! { "date": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(activities)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let recent_index = IndexModel::builder()
            .keys(doc! { "investor_id": 1, "date": -1 })
            .options(IndexOptions::builder()
                .name("investor_date_desc".to_string())
                .build())
            .build();

        self.collection::<Activity>()
            .create_indexes([recent_index])
            .await?;

        Ok(())
    }
}
