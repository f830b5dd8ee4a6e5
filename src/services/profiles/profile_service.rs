//! # 프로필 서비스
//!
//! 프로필은 역할 부여 시점에 빈 문서로 만들어지므로 여기서는 조회와 부분 수정만 합니다.

use std::sync::Arc;

use log::debug;
use mongodb::bson::{oid::ObjectId, Document};
use singleton_macro::service;

use crate::{
    core::errors::AppError,
    domain::dto::profiles::{FounderResponse, InvestorResponse, UpdateFounderRequest, UpdateInvestorRequest},
    repositories::profiles::{FounderRepository, InvestorRepository},
};

#[service(name = "profile")]
pub struct ProfileService {
    founder_repo: Arc<FounderRepository>,
    investor_repo: Arc<InvestorRepository>,
}

fn founder_not_found() -> AppError {
    AppError::NotFound("창업자 프로필을 찾을 수 없습니다".to_string())
}

fn investor_not_found() -> AppError {
    AppError::NotFound("투자자 프로필을 찾을 수 없습니다".to_string())
}

fn require_changes(changes: Document) -> Result<Document, AppError> {
    if changes.is_empty() {
        return Err(AppError::ValidationError("수정할 항목이 없습니다".to_string()));
    }
    Ok(changes)
}

impl ProfileService {
    pub async fn founder(&self, user_id: &ObjectId) -> Result<FounderResponse, AppError> {
        self.founder_repo
            .find_by_user_id(user_id)
            .await?
            .map(FounderResponse::from)
            .ok_or_else(founder_not_found)
    }

    pub async fn update_founder(
        &self,
        user_id: &ObjectId,
        request: &UpdateFounderRequest,
    ) -> Result<FounderResponse, AppError> {
        let changes = require_changes(request.changes())?;
        debug!("창업자 프로필 수정: {} ({}개 필드)", user_id, changes.len());

        self.founder_repo
            .update_profile(user_id, changes)
            .await?
            .map(FounderResponse::from)
            .ok_or_else(founder_not_found)
    }

    pub async fn investor(&self, user_id: &ObjectId) -> Result<InvestorResponse, AppError> {
        self.investor_repo
            .find_by_user_id(user_id)
            .await?
            .map(InvestorResponse::from)
            .ok_or_else(investor_not_found)
    }

    pub async fn update_investor(
        &self,
        user_id: &ObjectId,
        request: &UpdateInvestorRequest,
    ) -> Result<InvestorResponse, AppError> {
        let changes = require_changes(request.changes())?;
        debug!("투자자 프로필 수정: {} ({}개 필드)", user_id, changes.len());

        self.investor_repo
            .update_profile(user_id, changes)
            .await?
            .map(InvestorResponse::from)
            .ok_or_else(investor_not_found)
    }

    /// 투자자가 둘러보는 전체 스타트업 목록
    pub async fn list_startups(&self) -> Result<Vec<FounderResponse>, AppError> {
        let founders = self.founder_repo.find_all().await?;
        Ok(founders.into_iter().map(FounderResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_is_rejected() {
        let request = UpdateFounderRequest::default();
        assert!(matches!(require_changes(request.changes()), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_update_with_fields_passes_through() {
        let request = UpdateFounderRequest {
            industry: Some("Fintech".to_string()),
            ..Default::default()
        };
        let changes = require_changes(request.changes()).unwrap();
        assert_eq!(changes.get_str("industry").unwrap(), "Fintech");
    }
}
