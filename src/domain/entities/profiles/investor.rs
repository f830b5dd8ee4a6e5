//! 투자자 프로필과 포트폴리오 항목

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 포트폴리오 항목 (투자자 → 스타트업 배분 1건)
///
/// `current_value`는 평가 갱신(`refresh_valuations`) 전까지 비어 있을 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// 창업자의 사용자 ID
    pub startup_id: ObjectId,

    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invested_at: Option<DateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub user_id: ObjectId,

    pub investor_type: Option<String>,

    pub thesis: Option<String>,

    pub preferred_funding_stage: Option<String>,

    pub investment_range: Option<String>,

    pub investment_frequency: Option<String>,

    pub risk_tolerance: Option<String>,

    pub exit_strategy: Option<String>,

    #[serde(default)]
    pub preferred_industries: Vec<String>,

    #[serde(default)]
    pub preferred_regions: Vec<String>,

    #[serde(default)]
    pub total_invested: f64,

    #[serde(default)]
    pub investment_portfolio: Vec<PortfolioEntry>,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

impl Investor {
    pub fn new_empty(user_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id,
            investor_type: None,
            thesis: None,
            preferred_funding_stage: None,
            investment_range: None,
            investment_frequency: None,
            risk_tolerance: None,
            exit_strategy: None,
            preferred_industries: Vec::new(),
            preferred_regions: Vec::new(),
            total_invested: 0.0,
            investment_portfolio: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_legacy_document_without_portfolio_fields() {
        let user_id = ObjectId::new();
        let document = doc! {
            "user_id": user_id,
            "preferred_funding_stage": "Seed",
            "created_at": DateTime::now(),
            "updated_at": DateTime::now(),
        };

        let investor: Investor = bson::from_document(document).unwrap();
        assert_eq!(investor.user_id, user_id);
        assert!(investor.investment_portfolio.is_empty());
        assert!(investor.preferred_industries.is_empty());
        assert_eq!(investor.total_invested, 0.0);
    }

    #[test]
    fn test_portfolio_entry_without_current_value() {
        let document = doc! { "startup_id": ObjectId::new(), "amount": 25000.0 };
        let entry: PortfolioEntry = bson::from_document(document).unwrap();
        assert_eq!(entry.current_value, None);
        assert_eq!(entry.amount, 25000.0);
    }
}
