//! 지원금 요청 DTO

use chrono::{DateTime, Utc};
use mongodb::bson::{doc, Document};
use serde::Deserialize;
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::entities::grants::ApplicationStatus;
use crate::domain::entities::to_bson_datetime;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGrantRequest {
    #[validate(length(min = 1, max = 200, message = "지원금 이름은 1-200자 사이여야 합니다"))]
    #[validate(custom(function = "crate::domain::dto::validate_not_blank"))]
    pub name: String,

    #[validate(length(max = 5000))]
    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "crate::domain::dto::validate_positive_amount"))]
    pub amount: f64,

    #[validate(length(min = 1, max = 100))]
    pub category: String,

    #[validate(length(min = 1, max = 100))]
    pub region: String,

    pub deadline: DateTime<Utc>,

    #[serde(default)]
    pub eligibility: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGrantRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(custom(function = "crate::domain::dto::validate_positive_amount"))]
    pub amount: Option<f64>,

    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub region: Option<String>,

    pub deadline: Option<DateTime<Utc>>,

    pub eligibility: Option<Vec<String>>,
}

impl UpdateGrantRequest {
    /// `$set`에 들어갈 변경 필드만 모은 문서
    pub fn changes(&self) -> Document {
        let mut changes = Document::new();
        if let Some(name) = &self.name {
            changes.insert("name", name.trim());
        }
        if let Some(description) = &self.description {
            changes.insert("description", description.as_str());
        }
        if let Some(amount) = self.amount {
            changes.insert("amount", amount);
        }
        if let Some(category) = &self.category {
            changes.insert("category", category.as_str());
        }
        if let Some(region) = &self.region {
            changes.insert("region", region.as_str());
        }
        if let Some(deadline) = self.deadline {
            changes.insert("deadline", to_bson_datetime(deadline));
        }
        if let Some(eligibility) = &self.eligibility {
            changes.insert("eligibility", eligibility.clone());
        }
        changes
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplyGrantRequest {
    #[validate(length(min = 1, max = 10000, message = "제안서는 1-10000자 사이여야 합니다"))]
    #[validate(custom(function = "crate::domain::dto::validate_not_blank"))]
    pub proposal: String,

    #[validate(custom(function = "crate::domain::dto::validate_positive_amount"))]
    pub requested_amount: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewApplicationRequest {
    #[validate(length(min = 1))]
    pub status: String,

    /// 심사 의견
    #[validate(length(max = 2000, message = "심사 의견은 2000자 이하여야 합니다"))]
    pub remarks: Option<String>,
}

impl ReviewApplicationRequest {
    /// 심사 결과 `$set` 문서. 비어 있는 의견은 기존 값을 유지합니다.
    pub fn changes(&self) -> Result<Document, AppError> {
        let status = ApplicationStatus::parse(&self.status)?;
        let mut changes = doc! { "status": mongodb::bson::to_bson(&status)? };

        if let Some(remarks) = self.remarks.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            changes.insert("remarks", remarks);
        }
        Ok(changes)
    }
}

#[derive(Debug, Deserialize)]
pub struct GrantQuery {
    pub category: Option<String>,
    pub region: Option<String>,
    /// `true`면 마감되지 않은 지원금만
    pub open_only: Option<bool>,
}

impl GrantQuery {
    pub fn filter(&self, now: mongodb::bson::DateTime) -> Document {
        let mut filter = Document::new();
        if let Some(category) = &self.category {
            filter.insert("category", category.as_str());
        }
        if let Some(region) = &self.region {
            filter.insert("region", region.as_str());
        }
        if self.open_only.unwrap_or(false) {
            filter.insert("deadline", doc! { "$gte": now });
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_changes_only_contains_present_fields() {
        let request = UpdateGrantRequest {
            name: Some("  Seed Boost ".into()),
            description: None,
            amount: Some(25000.0),
            category: None,
            region: None,
            deadline: None,
            eligibility: None,
        };

        let changes = request.changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes.get_str("name").unwrap(), "Seed Boost");
        assert_eq!(changes.get_f64("amount").unwrap(), 25000.0);
    }

    #[test]
    fn test_apply_rejects_non_positive_amount() {
        let request = ApplyGrantRequest {
            proposal: "Build a prototype".into(),
            requested_amount: 0.0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_review_changes_carry_remarks() {
        let request = ReviewApplicationRequest {
            status: "rejected".into(),
            remarks: Some("  Budget exceeds program cap ".into()),
        };
        let changes = request.changes().unwrap();
        assert_eq!(changes.get_str("status").unwrap(), "rejected");
        assert_eq!(changes.get_str("remarks").unwrap(), "Budget exceeds program cap");

        let blank = ReviewApplicationRequest { status: "approved".into(), remarks: Some("   ".into()) };
        assert!(blank.changes().unwrap().get("remarks").is_none());

        let unknown = ReviewApplicationRequest { status: "maybe".into(), remarks: None };
        assert!(matches!(unknown.changes(), Err(AppError::ValidationError(_))));

        let long = ReviewApplicationRequest { status: "approved".into(), remarks: Some("x".repeat(2001)) };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_query_filter_open_only() {
        let query = GrantQuery {
            category: Some("climate".into()),
            region: None,
            open_only: Some(true),
        };

        let filter = query.filter(mongodb::bson::DateTime::now());
        assert_eq!(filter.get_str("category").unwrap(), "climate");
        assert!(filter.get_document("deadline").is_ok());
        assert!(filter.get("region").is_none());
    }
}
