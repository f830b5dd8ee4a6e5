//! 지원금 신청서. 창업자는 공고당 한 번만 신청할 수 있습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim() {
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(AppError::ValidationError(format!("유효하지 않은 신청 상태입니다: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantApplication {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub grant_id: ObjectId,

    /// 창업자 사용자 ID
    pub founder_id: ObjectId,

    pub proposal: String,

    pub requested_amount: f64,

    pub status: ApplicationStatus,

    /// 관리자 심사 의견
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

impl GrantApplication {
    pub fn new(grant_id: ObjectId, founder_id: ObjectId, proposal: String, requested_amount: f64) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            grant_id,
            founder_id,
            proposal,
            requested_amount,
            status: ApplicationStatus::Pending,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_application_is_pending() {
        let application = GrantApplication::new(ObjectId::new(), ObjectId::new(), "R&D".into(), 5000.0);
        assert_eq!(application.status, ApplicationStatus::Pending);
        assert!(ApplicationStatus::parse("approved").is_ok());
        assert!(ApplicationStatus::parse("maybe").is_err());
        assert!(application.remarks.is_none());
    }

    #[test]
    fn test_stored_application_without_remarks_loads() {
        let stored = mongodb::bson::doc! {
            "_id": ObjectId::new(),
            "grant_id": ObjectId::new(),
            "founder_id": ObjectId::new(),
            "proposal": "Pilot",
            "requested_amount": 1200.0,
            "status": "pending",
            "created_at": DateTime::now(),
            "updated_at": DateTime::now(),
        };
        let application: GrantApplication = mongodb::bson::from_document(stored).unwrap();
        assert!(application.remarks.is_none());
    }
}
