//! # 지원금 서비스
//!
//! 공고 작성/수정/삭제와 신청 심사는 관리자, 신청은 창업자가 합니다.
//! 창업자는 공고당 한 번만 신청할 수 있고 마감이 지난 공고에는 신청할 수 없습니다.

use std::sync::Arc;

use log::info;
use mongodb::bson::{oid::ObjectId, DateTime};
use singleton_macro::service;

use crate::{
    core::errors::AppError,
    domain::{
        dto::grants::{
            ApplyGrantRequest, CreateGrantRequest, GrantApplicationResponse, GrantQuery, GrantResponse,
            ReviewApplicationRequest, UpdateGrantRequest,
        },
        entities::{
            grants::{Grant, GrantApplication},
            to_bson_datetime,
        },
    },
    repositories::grants::{GrantApplicationRepository, GrantRepository},
};

#[service(name = "grant")]
pub struct GrantService {
    grant_repo: Arc<GrantRepository>,
    application_repo: Arc<GrantApplicationRepository>,
}

fn grant_not_found() -> AppError {
    AppError::NotFound("지원금을 찾을 수 없습니다".to_string())
}

fn grant_from_request(request: &CreateGrantRequest, created_by: ObjectId) -> Grant {
    let now = DateTime::now();
    Grant {
        id: None,
        name: request.name.trim().to_string(),
        description: request.description.clone(),
        amount: request.amount,
        category: request.category.trim().to_string(),
        region: request.region.trim().to_string(),
        deadline: to_bson_datetime(request.deadline),
        eligibility: request.eligibility.clone(),
        created_by,
        created_at: now,
        updated_at: now,
    }
}

impl GrantService {
    async fn existing(&self, grant_id: &ObjectId) -> Result<Grant, AppError> {
        self.grant_repo.find_by_id(grant_id).await?.ok_or_else(grant_not_found)
    }

    pub async fn list(&self, query: &GrantQuery) -> Result<Vec<GrantResponse>, AppError> {
        let grants = self.grant_repo.find_matching(query.filter(DateTime::now())).await?;
        Ok(grants.into_iter().map(GrantResponse::from).collect())
    }

    pub async fn get(&self, grant_id: &ObjectId) -> Result<GrantResponse, AppError> {
        self.existing(grant_id).await.map(GrantResponse::from)
    }

    pub async fn create(&self, admin_id: &ObjectId, request: &CreateGrantRequest) -> Result<GrantResponse, AppError> {
        let grant = self.grant_repo.create(grant_from_request(request, *admin_id)).await?;
        info!("지원금 공고 등록: {} (작성자 {})", grant.name, admin_id);
        Ok(GrantResponse::from(grant))
    }

    pub async fn update(&self, grant_id: &ObjectId, request: &UpdateGrantRequest) -> Result<GrantResponse, AppError> {
        let changes = request.changes();
        if changes.is_empty() {
            return Err(AppError::ValidationError("수정할 항목이 없습니다".to_string()));
        }

        self.grant_repo
            .update(grant_id, changes)
            .await?
            .map(GrantResponse::from)
            .ok_or_else(grant_not_found)
    }

    pub async fn delete(&self, grant_id: &ObjectId) -> Result<(), AppError> {
        if !self.grant_repo.delete(grant_id).await? {
            return Err(grant_not_found());
        }
        info!("지원금 공고 삭제: {}", grant_id);
        Ok(())
    }

    /// 창업자 신청. 중복 신청은 `ConflictError`, 마감 후 신청은 `ValidationError`.
    pub async fn apply(
        &self,
        grant_id: &ObjectId,
        founder_id: &ObjectId,
        request: &ApplyGrantRequest,
    ) -> Result<GrantApplicationResponse, AppError> {
        let grant = self.existing(grant_id).await?;

        if !grant.is_open_at(DateTime::now()) {
            return Err(AppError::ValidationError("신청 기간이 지난 지원금입니다".to_string()));
        }

        if self.application_repo.exists_for(grant_id, founder_id).await? {
            return Err(AppError::ConflictError("이미 신청한 지원금입니다".to_string()));
        }

        let application = self.application_repo
            .create(GrantApplication::new(
                *grant_id,
                *founder_id,
                request.proposal.trim().to_string(),
                request.requested_amount,
            ))
            .await?;

        info!("지원금 신청: {} → {}", founder_id, grant_id);
        Ok(GrantApplicationResponse::from(application))
    }

    pub async fn founder_applications(&self, founder_id: &ObjectId) -> Result<Vec<GrantApplicationResponse>, AppError> {
        let applications = self.application_repo.find_by_founder(founder_id).await?;
        Ok(applications.into_iter().map(GrantApplicationResponse::from).collect())
    }

    pub async fn grant_applications(&self, grant_id: &ObjectId) -> Result<Vec<GrantApplicationResponse>, AppError> {
        self.existing(grant_id).await?;
        let applications = self.application_repo.find_by_grant(grant_id).await?;
        Ok(applications.into_iter().map(GrantApplicationResponse::from).collect())
    }

    /// 신청서 상태와 심사 의견 저장
    pub async fn review(
        &self,
        grant_id: &ObjectId,
        application_id: &ObjectId,
        request: &ReviewApplicationRequest,
    ) -> Result<GrantApplicationResponse, AppError> {
        let changes = request.changes()?;

        self.application_repo
            .apply_review(application_id, grant_id, changes)
            .await?
            .map(GrantApplicationResponse::from)
            .ok_or_else(|| AppError::NotFound("신청서를 찾을 수 없습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_grant_from_request_trims_and_records_author() {
        let admin = ObjectId::new();
        let request = CreateGrantRequest {
            name: "  Climate Seed Fund ".to_string(),
            description: "Early stage climate tech".to_string(),
            amount: 50000.0,
            category: "climate".to_string(),
            region: " EU ".to_string(),
            deadline: Utc::now() + Duration::days(30),
            eligibility: vec!["pre-seed".to_string()],
        };

        let grant = grant_from_request(&request, admin);
        assert_eq!(grant.name, "Climate Seed Fund");
        assert_eq!(grant.region, "EU");
        assert_eq!(grant.created_by, admin);
        assert!(grant.id.is_none());
        assert!(grant.is_open_at(DateTime::now()));
    }
}
