//! 포트폴리오 평가 이력 리포지토리 (`portfolio_valuations`)

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::performance::PortfolioValuation,
};

#[repository(name = "valuation", collection = "portfolio_valuations")]
pub struct ValuationRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl ValuationRepository {
    /// `[from, to]` 구간의 평가 이력 (날짜 오름차순)
    pub async fn find_in_range(
        &self,
        investor_id: &ObjectId,
        from: DateTime,
        to: DateTime,
    ) -> Result<Vec<PortfolioValuation>, AppError> {
        let valuations = self.collection::<PortfolioValuation>()
            .find(doc! {
                "investor_id": investor_id,
                "date": { "$gte": from, "$lte": to },
            })
            .sort(doc! { "date": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(valuations)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let history_index = IndexModel::builder()
            .keys(doc! { "investor_id": 1, "date": 1 })
            .options(IndexOptions::builder()
                .name("investor_date".to_string())
                .build())
            .build();

        self.collection::<PortfolioValuation>()
            .create_indexes([history_index])
            .await?;

        Ok(())
    }
}
