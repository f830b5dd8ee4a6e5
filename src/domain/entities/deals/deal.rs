//! 딜 (파이프라인 집계 루트)
//!
//! (투자자, 창업자) 쌍마다 최대 하나만 존재합니다. 이 불변식은 서비스의 사전 조회와
//! `deals` 컬렉션의 유니크 인덱스 `(investor_id, startup_id)`가 함께 보장합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::deal_items::{DealDocument, Meeting, Note, Task};
use super::deal_state::{DealStage, DealStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// 투자자 사용자 ID
    pub investor_id: ObjectId,

    /// 창업자 사용자 ID
    pub startup_id: ObjectId,

    pub stage: DealStage,

    pub status: DealStatus,

    #[serde(default)]
    pub match_score: f64,

    /// 남은 모집 금액. 투자 실행마다 감소합니다.
    #[serde(default)]
    pub fund_required: f64,

    #[serde(default)]
    pub meetings: Vec<Meeting>,

    #[serde(default)]
    pub documents: Vec<DealDocument>,

    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub notes: Vec<Note>,

    pub added_date: DateTime,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

impl Deal {
    /// 새 딜은 `screening` 단계, `active` 상태로 시작합니다.
    pub fn new(investor_id: ObjectId, startup_id: ObjectId, match_score: f64, fund_required: f64) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            investor_id,
            startup_id,
            stage: DealStage::Screening,
            status: DealStatus::Active,
            match_score,
            fund_required,
            meetings: Vec::new(),
            documents: Vec::new(),
            tasks: Vec::new(),
            notes: Vec::new(),
            added_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deal_defaults() {
        let deal = Deal::new(ObjectId::new(), ObjectId::new(), 82.5, 250000.0);
        assert_eq!(deal.stage, DealStage::Screening);
        assert_eq!(deal.status, DealStatus::Active);
        assert!(deal.meetings.is_empty() && deal.tasks.is_empty());
        assert_eq!(deal.added_date, deal.created_at);
    }
}
