//! 투자 원장 항목. 한 번 기록되면 수정되지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub deal_id: ObjectId,

    pub investor_id: ObjectId,

    pub founder_id: ObjectId,

    pub amount: f64,

    pub investment_date: DateTime,

    pub created_at: DateTime,
}

impl Investment {
    /// ID를 미리 생성해 트랜잭션 안의 다른 쓰기에서 참조할 수 있게 합니다.
    pub fn new(deal_id: ObjectId, investor_id: ObjectId, founder_id: ObjectId, amount: f64) -> Self {
        let now = DateTime::now();
        Self {
            id: Some(ObjectId::new()),
            deal_id,
            investor_id,
            founder_id,
            amount,
            investment_date: now,
            created_at: now,
        }
    }
}
