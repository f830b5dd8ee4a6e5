//! 투자 원장 리포지토리
//!
//! `investments` 문서는 한 번 기록되면 수정되지 않습니다.

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
    domain::entities::deals::Investment,
};

#[repository(name = "investment", collection = "investments")]
pub struct InvestmentRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl InvestmentRepository {
    /// 투자 트랜잭션 내 원장 기록 (`id`는 호출자가 미리 생성)
    pub async fn insert(&self, investment: &Investment, session: &mut ClientSession) -> Result<(), AppError> {
        self.collection::<Investment>()
            .insert_one(investment)
            .session(&mut *session)
            .await?;
        Ok(())
    }

    pub async fn find_by_founder(&self, founder_id: &ObjectId) -> Result<Vec<Investment>, AppError> {
        let investments = self.collection::<Investment>()
            .find(doc! { "founder_id": founder_id })
            .sort(doc! { "investment_date": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(investments)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let founder_index = IndexModel::builder()
            .keys(doc! { "founder_id": 1 })
            .options(IndexOptions::builder()
                .name("founder_id".to_string())
                .build())
            .build();

        let investor_index = IndexModel::builder()
            .keys(doc! { "investor_id": 1, "investment_date": -1 })
            .options(IndexOptions::builder()
                .name("investor_date_desc".to_string())
                .build())
            .build();

        self.collection::<Investment>()
            .create_indexes([founder_index, investor_index])
            .await?;

        Ok(())
    }
}
