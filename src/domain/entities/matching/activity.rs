//! 투자자 활동 로그 (추가 전용)
//!
//! 매칭, 딜, 미팅 변경의 부수 효과로 기록되어 대시보드 "최근 활동"에 노출됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Match,
    Deal,
    Meeting,
    DealUpdate,
    Investment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub investor_id: ObjectId,

    #[serde(rename = "type")]
    pub activity_type: ActivityType,

    pub description: String,

    pub date: DateTime,
}

impl Activity {
    pub fn new(investor_id: ObjectId, activity_type: ActivityType, description: impl Into<String>) -> Self {
        Self {
            id: None,
            investor_id,
            activity_type,
            description: description.into(),
            date: DateTime::now(),
        }
    }

    pub fn new_match(investor_id: ObjectId, percentage: f64) -> Self {
        Self::new(
            investor_id,
            ActivityType::Match,
            format!("New match with {:.0}% compatibility", percentage),
        )
    }

    pub fn deal_added(investor_id: ObjectId) -> Self {
        Self::new(investor_id, ActivityType::Deal, "Added new startup to deal flow")
    }

    pub fn meeting_scheduled(investor_id: ObjectId, title: &str) -> Self {
        Self::new(investor_id, ActivityType::Meeting, format!("Meeting scheduled: {}", title))
    }

    pub fn stage_changed(investor_id: ObjectId, stage: &str) -> Self {
        Self::new(investor_id, ActivityType::DealUpdate, format!("Deal stage updated to {}", stage))
    }

    pub fn invested(investor_id: ObjectId, amount: f64) -> Self {
        Self::new(investor_id, ActivityType::Investment, format!("Invested {:.2} in startup", amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_descriptions() {
        let investor = ObjectId::new();
        assert_eq!(Activity::new_match(investor, 87.6).description, "New match with 88% compatibility");
        assert_eq!(Activity::meeting_scheduled(investor, "Intro").description, "Meeting scheduled: Intro");
        assert_eq!(Activity::stage_changed(investor, "negotiation").description, "Deal stage updated to negotiation");
    }

    #[test]
    fn test_activity_type_wire_names() {
        let json = serde_json::to_value(Activity::deal_added(ObjectId::new())).unwrap();
        assert_eq!(json["type"], "deal");
        assert_eq!(serde_json::to_string(&ActivityType::DealUpdate).unwrap(), "\"deal_update\"");
    }
}
