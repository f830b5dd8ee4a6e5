//! 지원금 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::grants::{ApplicationStatus, Grant, GrantApplication};
use crate::domain::entities::to_chrono_datetime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub region: String,
    pub deadline: DateTime<Utc>,
    pub eligibility: Vec<String>,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Grant> for GrantResponse {
    fn from(grant: Grant) -> Self {
        let is_open = grant.is_open_at(mongodb::bson::DateTime::now());
        Self {
            id: grant.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: grant.name,
            description: grant.description,
            amount: grant.amount,
            category: grant.category,
            region: grant.region,
            deadline: to_chrono_datetime(grant.deadline),
            eligibility: grant.eligibility,
            is_open,
            created_at: to_chrono_datetime(grant.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantApplicationResponse {
    pub id: String,
    pub grant_id: String,
    pub founder_id: String,
    pub proposal: String,
    pub requested_amount: f64,
    pub status: ApplicationStatus,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GrantApplication> for GrantApplicationResponse {
    fn from(application: GrantApplication) -> Self {
        Self {
            id: application.id.map(|id| id.to_hex()).unwrap_or_default(),
            grant_id: application.grant_id.to_hex(),
            founder_id: application.founder_id.to_hex(),
            proposal: application.proposal,
            requested_amount: application.requested_amount,
            status: application.status,
            remarks: application.remarks,
            created_at: to_chrono_datetime(application.created_at),
            updated_at: to_chrono_datetime(application.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_application_response_exposes_remarks() {
        let mut application = GrantApplication::new(ObjectId::new(), ObjectId::new(), "Pilot".into(), 800.0);
        application.status = ApplicationStatus::Rejected;
        application.remarks = Some("Outside program region".into());

        let json = serde_json::to_value(GrantApplicationResponse::from(application)).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["remarks"], "Outside program region");
    }
}
