//! # 투자자 프로필 리포지토리
//!
//! `investors` 컬렉션. 포트폴리오 항목은 투자 문서에 내장되며 투자 실행 시에만 추가됩니다.

use std::sync::Arc;

use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    ClientSession, IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::{redis::RedisClient, PROFILE_CACHE_TTL_SECONDS},
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::profiles::{Investor, PortfolioEntry},
};

#[repository(name = "investor", collection = "investors")]
pub struct InvestorRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl InvestorRepository {
    pub async fn find_by_user_id(&self, user_id: &ObjectId) -> Result<Option<Investor>, AppError> {
        let cache_key = self.cache_key(&user_id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<Investor>(&cache_key).await {
            return Ok(Some(cached));
        }

        let investor = self.collection::<Investor>()
            .find_one(doc! { "user_id": user_id })
            .await?;

        if let Some(ref investor) = investor {
            let _ = self.redis
                .set_with_expiry(&cache_key, investor, PROFILE_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(investor)
    }

    /// 포트폴리오 평가에 쓰이므로 캐시를 거치지 않는 조회
    pub async fn find_fresh(&self, user_id: &ObjectId) -> Result<Option<Investor>, AppError> {
        Ok(self.collection::<Investor>()
            .find_one(doc! { "user_id": user_id })
            .await?)
    }

    pub async fn create_if_missing(&self, user_id: &ObjectId) -> Result<(), AppError> {
        let empty = bson::to_document(&Investor::new_empty(*user_id))?;

        self.collection::<Investor>()
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
    ) -> Result<Option<Investor>, AppError> {
        changes.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<Investor>()
            .find_one_and_update(doc! { "user_id": user_id }, doc! { "$set": changes })
            .with_options(options)
            .await?;

        let _ = self.invalidate_cache(&user_id.to_hex()).await;
        Ok(updated)
    }

    /// 투자 트랜잭션 내 포트폴리오 항목 추가와 누적 투자액 증가
    pub async fn record_investment(
        &self,
        user_id: &ObjectId,
        entry: &PortfolioEntry,
        session: &mut ClientSession,
    ) -> Result<(), AppError> {
        let entry_doc = bson::to_document(entry)?;

        let result = self.collection::<Investor>()
            .update_one(
                doc! { "user_id": user_id },
                doc! {
                    "$push": { "investment_portfolio": entry_doc },
                    "$inc": { "total_invested": entry.amount },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .session(&mut *session)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("투자자 프로필을 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    /// 현재 가치가 비어 있는 포트폴리오 항목에만 값을 기록
    ///
    /// `(index, value)` 쌍마다 해당 위치의 `current_value`가 아직 없을 때만 반영되므로
    /// 같은 입력으로 여러 번 호출해도 결과가 같습니다. 반영된 항목 수를 반환합니다.
    pub async fn fill_current_values(
        &self,
        user_id: &ObjectId,
        values: &[(usize, f64)],
    ) -> Result<usize, AppError> {
        let mut updated = 0;

        for (index, value) in values {
            let path = format!("investment_portfolio.{}.current_value", index);

            let mut filter = doc! { "user_id": user_id };
            filter.insert(path.clone(), Bson::Null);
            let mut changes = Document::new();
            changes.insert(path, *value);

            let result = self.collection::<Investor>()
                .update_one(filter, doc! { "$set": changes })
                .await?;
            updated += result.modified_count as usize;
        }

        if updated > 0 {
            let _ = self.invalidate_cache(&user_id.to_hex()).await;
        }
        Ok(updated)
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

        self.collection::<Investor>()
            .create_indexes([user_index])
            .await?;

        Ok(())
    }
}
