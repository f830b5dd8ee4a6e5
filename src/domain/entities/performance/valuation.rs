//! 포트폴리오 평가 이력 (시점별 총 가치)

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioValuation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub investor_id: ObjectId,

    pub date: DateTime,

    pub value: f64,
}
