//! # 매칭 서비스
//!
//! ```text
//! score_founder ── 프로필 조회 ── score_pair (후보 조건 + 외부 스코어링)
//!               └─ MatchRepository::upsert_score ── 신규면 Activity 기록
//! ```
//!
//! 활동 로그 쓰기가 실패해도 매칭 결과는 그대로 반환합니다.

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;

use crate::{
    clients::ScoringClient,
    core::errors::AppError,
    domain::{
        dto::{
            matching::{MatchResponse, MatchScoreResponse},
            profiles::FounderResponse,
        },
        entities::{
            matching::Activity,
            profiles::{Founder, Investor},
        },
    },
    repositories::{
        matching::{ActivityRepository, MatchRepository},
        profiles::{FounderRepository, InvestorRepository},
    },
    services::matching::scoring::score_pair,
};

#[service(name = "matching")]
pub struct MatchingService {
    founder_repo: Arc<FounderRepository>,
    investor_repo: Arc<InvestorRepository>,
    match_repo: Arc<MatchRepository>,
    activity_repo: Arc<ActivityRepository>,
    scoring_client: Arc<ScoringClient>,
}

impl MatchingService {
    async fn investor_profile(&self, investor_id: &ObjectId) -> Result<Investor, AppError> {
        self.investor_repo
            .find_by_user_id(investor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("투자자 프로필을 찾을 수 없습니다".to_string()))
    }

    async fn founder_profile(&self, founder_id: &ObjectId) -> Result<Founder, AppError> {
        self.founder_repo
            .find_by_user_id(founder_id)
            .await?
            .ok_or_else(|| AppError::NotFound("창업자 프로필을 찾을 수 없습니다".to_string()))
    }

    /// 호출 투자자의 선호에 맞는 창업자 목록
    pub async fn candidates(&self, investor_id: &ObjectId) -> Result<Vec<FounderResponse>, AppError> {
        let investor = self.investor_profile(investor_id).await?;

        let Some(stage) = investor.preferred_funding_stage.as_deref() else {
            return Ok(Vec::new());
        };

        let founders = self.founder_repo
            .find_candidates(&investor.preferred_industries, stage)
            .await?;

        Ok(founders.into_iter().map(FounderResponse::from).collect())
    }

    /// 점수 산출 후 매칭 저장
    pub async fn score_founder(
        &self,
        investor_id: &ObjectId,
        founder_id: &ObjectId,
    ) -> Result<MatchScoreResponse, AppError> {
        let (founder, investor) = futures_util::future::try_join(
            self.founder_profile(founder_id),
            self.investor_profile(investor_id),
        )
        .await?;

        let percentage = score_pair(self.scoring_client.as_ref(), &founder, &investor).await?;
        let stored = self.match_repo.upsert_score(investor_id, founder_id, percentage).await?;

        if stored.created {
            if let Err(e) = self.activity_repo.insert(&Activity::new_match(*investor_id, percentage)).await {
                warn!("매칭 활동 기록 실패 (투자자 {}): {}", investor_id, e);
            }
            info!("새 매칭 생성: {} ↔ {} ({:.2}%)", investor_id, founder_id, percentage);
        }

        Ok(MatchScoreResponse {
            match_id: stored.record.id.map(|id| id.to_hex()).unwrap_or_default(),
            match_probability: percentage,
            created: stored.created,
        })
    }

    /// 투자자의 매칭 목록 (창업자 정보 포함)
    pub async fn investor_matches(&self, investor_id: &ObjectId) -> Result<Vec<MatchResponse>, AppError> {
        let matches = self.match_repo.find_by_investor(investor_id).await?;

        let founder_ids: Vec<ObjectId> = matches.iter().map(|m| m.founder_id).collect();
        let founders: HashMap<ObjectId, Founder> = self.founder_repo
            .find_by_user_ids(&founder_ids)
            .await?
            .into_iter()
            .map(|f| (f.user_id, f))
            .collect();

        Ok(matches
            .into_iter()
            .map(|record| {
                let founder = founders.get(&record.founder_id);
                MatchResponse::new(
                    record,
                    founder.map(|f| f.startup_name.clone()).filter(|n| !n.is_empty()),
                    founder.and_then(|f| f.industry.clone()),
                )
            })
            .collect())
    }

    pub async fn update_bookmark(
        &self,
        match_id: &ObjectId,
        investor_id: &ObjectId,
        bookmark: bool,
        tags: Option<Vec<String>>,
    ) -> Result<MatchResponse, AppError> {
        self.match_repo
            .update_bookmark(match_id, investor_id, bookmark, tags)
            .await?
            .map(MatchResponse::from)
            .ok_or_else(|| AppError::NotFound("매칭을 찾을 수 없습니다".to_string()))
    }
}
