//! # 창업자 프로필 리포지토리
//!
//! `founders` 컬렉션. 사용자 ID 기준 단건 조회는 `founder:{user_id}` 키로 캐시됩니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    ClientSession, IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::{redis::RedisClient, PROFILE_CACHE_TTL_SECONDS},
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::profiles::Founder,
};

#[repository(name = "founder", collection = "founders")]
pub struct FounderRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl FounderRepository {
    pub async fn find_by_user_id(&self, user_id: &ObjectId) -> Result<Option<Founder>, AppError> {
        let cache_key = self.cache_key(&user_id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<Founder>(&cache_key).await {
            return Ok(Some(cached));
        }

        let founder = self.collection::<Founder>()
            .find_one(doc! { "user_id": user_id })
            .await?;

        if let Some(ref founder) = founder {
            let _ = self.redis
                .set_with_expiry(&cache_key, founder, PROFILE_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(founder)
    }

    /// 여러 창업자를 한 번에 조회 (캐시 미사용)
    pub async fn find_by_user_ids(&self, user_ids: &[ObjectId]) -> Result<Vec<Founder>, AppError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let founders = self.collection::<Founder>()
            .find(doc! { "user_id": { "$in": user_ids.to_vec() } })
            .await?
            .try_collect()
            .await?;

        Ok(founders)
    }

    pub async fn find_all(&self) -> Result<Vec<Founder>, AppError> {
        let founders = self.collection::<Founder>()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(founders)
    }

    /// 매칭 후보: 산업이 선호 목록에 있고 투자 단계가 정확히 같은 창업자
    pub async fn find_candidates(
        &self,
        industries: &[String],
        funding_stage: &str,
    ) -> Result<Vec<Founder>, AppError> {
        if industries.is_empty() {
            return Ok(Vec::new());
        }

        let founders = self.collection::<Founder>()
            .find(doc! {
                "industry": { "$in": industries.to_vec() },
                "funding_stage": funding_stage,
            })
            .await?
            .try_collect()
            .await?;

        Ok(founders)
    }

    /// 프로필이 없을 때만 빈 프로필 생성
    pub async fn create_if_missing(&self, user_id: &ObjectId) -> Result<(), AppError> {
        let empty = bson::to_document(&Founder::new_empty(*user_id))?;

        self.collection::<Founder>()
            .update_one(doc! { "user_id": user_id }, doc! { "$setOnInsert": empty })
            .upsert(true)
            .await?;

        let _ = self.invalidate_cache(&user_id.to_hex()).await;
        Ok(())
    }

    pub async fn update_profile(
        &self,
        user_id: &ObjectId,
        mut changes: Document,
    ) -> Result<Option<Founder>, AppError> {
        changes.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<Founder>()
            .find_one_and_update(doc! { "user_id": user_id }, doc! { "$set": changes })
            .with_options(options)
            .await?;

        let _ = self.invalidate_cache(&user_id.to_hex()).await;
        Ok(updated)
    }

    /// 투자 트랜잭션 내 누적 투자액 증가. 프로필이 없으면 `NotFound`.
    pub async fn increment_total_invested(
        &self,
        user_id: &ObjectId,
        amount: f64,
        session: &mut ClientSession,
    ) -> Result<(), AppError> {
        let result = self.collection::<Founder>()
            .update_one(
                doc! { "user_id": user_id },
                doc! {
                    "$inc": { "total_invested": amount },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .session(&mut *session)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("창업자 프로필을 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    pub async fn evict(&self, user_id: &ObjectId) {
        let _ = self.invalidate_cache(&user_id.to_hex()).await;
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        let candidate_index = IndexModel::builder()
            .keys(doc! { "industry": 1, "funding_stage": 1 })
            .options(IndexOptions::builder()
                .name("industry_stage".to_string())
                .build())
            .build();

        self.collection::<Founder>()
            .create_indexes([user_index, candidate_index])
            .await?;

        Ok(())
    }
}
