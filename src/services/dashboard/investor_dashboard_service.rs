//! # 투자자 대시보드 서비스
//!
//! 포트폴리오, 파이프라인, 최근 활동을 모아 대시보드 응답을 만듭니다.
//! 조회 경로는 저장소에 쓰지 않으며, 비어 있는 포트폴리오 평가액을 채우는 일은
//! [`InvestorDashboardService::refresh_valuations`]만 합니다.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use futures_util::future::try_join3;
use log::{debug, info};
use mongodb::bson::oid::ObjectId;
use rand::{rngs::StdRng, SeedableRng};
use singleton_macro::service;

use crate::{
    config::PerformanceConfig,
    core::errors::AppError,
    domain::{
        dto::dashboard::{
            ActivityResponse, InvestorDashboard, PerformancePoint, PerformanceResponse, PipelineSummary,
            PortfolioSummary, RecentDeal, RevaluationResponse,
        },
        entities::{
            deals::DealStage,
            profiles::{Founder, PortfolioEntry},
            to_bson_datetime, to_chrono_datetime,
        },
    },
    repositories::{
        deals::{DealRepository, EnrichedDeal},
        matching::ActivityRepository,
        performance::ValuationRepository,
        profiles::{FounderRepository, InvestorRepository},
    },
    services::dashboard::{
        calculations::{missing_valuations, summarize_portfolio},
        performance::{compute_metrics, synthesize_series, PerformancePeriod},
    },
};

pub const RECENT_DEAL_LIMIT: i64 = 5;
pub const RECENT_ACTIVITY_LIMIT: i64 = 5;
pub const ACTIVITY_FEED_LIMIT: i64 = 50;

impl From<EnrichedDeal> for RecentDeal {
    fn from(enriched: EnrichedDeal) -> Self {
        let deal = enriched.deal;
        Self {
            deal_id: deal.id.map(|id| id.to_hex()).unwrap_or_default(),
            startup_id: deal.startup_id.to_hex(),
            founder_name: enriched.founder_name,
            startup_name: enriched.startup_name,
            industry: enriched.industry,
            stage: deal.stage,
            status: deal.status,
            match_score: deal.match_score,
            updated_at: to_chrono_datetime(deal.updated_at),
        }
    }
}

#[service(name = "investordashboard")]
pub struct InvestorDashboardService {
    investor_repo: Arc<InvestorRepository>,
    founder_repo: Arc<FounderRepository>,
    deal_repo: Arc<DealRepository>,
    activity_repo: Arc<ActivityRepository>,
    valuation_repo: Arc<ValuationRepository>,
}

impl InvestorDashboardService {
    async fn founders_for(&self, entries: &[PortfolioEntry]) -> Result<HashMap<ObjectId, Founder>, AppError> {
        let startup_ids: Vec<ObjectId> = entries.iter().map(|e| e.startup_id).collect();

        let founders = self.founder_repo.find_by_user_ids(&startup_ids).await?;
        Ok(founders.into_iter().map(|f| (f.user_id, f)).collect())
    }

    /// 포트폴리오 요약. 투자자 프로필이나 포트폴리오가 없으면 0으로 채운 요약.
    pub async fn portfolio_summary(&self, investor_id: &ObjectId) -> Result<PortfolioSummary, AppError> {
        let entries = match self.investor_repo.find_by_user_id(investor_id).await? {
            Some(investor) => investor.investment_portfolio,
            None => return Ok(PortfolioSummary::default()),
        };

        let founders = self.founders_for(&entries).await?;
        Ok(summarize_portfolio(&entries, &founders))
    }

    pub async fn pipeline_summary(&self, investor_id: &ObjectId) -> Result<PipelineSummary, AppError> {
        let (total_deals, closed_deals, recent) = try_join3(
            self.deal_repo.count_by_investor(investor_id),
            self.deal_repo.count_in_stage(investor_id, DealStage::Closed),
            self.deal_repo.find_enriched(investor_id, Some(RECENT_DEAL_LIMIT)),
        )
        .await?;

        Ok(PipelineSummary {
            total_deals,
            pending_deals: total_deals.saturating_sub(closed_deals),
            closed_deals,
            recent_deals: recent.into_iter().map(RecentDeal::from).collect(),
        })
    }

    pub async fn recent_activities(&self, investor_id: &ObjectId, limit: i64) -> Result<Vec<ActivityResponse>, AppError> {
        let activities = self.activity_repo.recent(investor_id, limit).await?;
        Ok(activities.into_iter().map(ActivityResponse::from).collect())
    }

    pub async fn dashboard(&self, investor_id: &ObjectId) -> Result<InvestorDashboard, AppError> {
        let (portfolio_summary, pipeline_summary, recent_activities) = try_join3(
            self.portfolio_summary(investor_id),
            self.pipeline_summary(investor_id),
            self.recent_activities(investor_id, RECENT_ACTIVITY_LIMIT),
        )
        .await?;

        Ok(InvestorDashboard {
            portfolio_summary,
            pipeline_summary,
            recent_activities,
        })
    }

    /// 기간별 성과 시계열과 지표
    ///
    /// 평가 이력이 비어 있고 임시 시계열이 켜져 있으면 `synthetic = true`인 시계열을 돌려줍니다.
    pub async fn performance(&self, investor_id: &ObjectId, period: Option<&str>) -> Result<PerformanceResponse, AppError> {
        let period = PerformancePeriod::parse(period);
        let end = Utc::now();
        let start = period.start_before(end);

        let valuations = self.valuation_repo
            .find_in_range(investor_id, to_bson_datetime(start), to_bson_datetime(end))
            .await?;

        let mut points: Vec<PerformancePoint> = valuations
            .into_iter()
            .map(|v| PerformancePoint {
                date: to_chrono_datetime(v.date),
                value: v.value,
            })
            .collect();

        let synthetic = points.is_empty() && PerformanceConfig::synthetic_fallback();
        if synthetic {
            let mut rng = match PerformanceConfig::seed() {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            points = synthesize_series(start, end, &mut rng);
            debug!("평가 이력 없음, 임시 시계열 생성: 투자자 {} ({})", investor_id, period.as_str());
        }

        Ok(PerformanceResponse {
            period: period.as_str().to_string(),
            metrics: compute_metrics(&points),
            performance_data: points,
            synthetic,
        })
    }

    /// 현재 가치가 없는 포트폴리오 항목에 추정 가치를 기록
    ///
    /// 이미 값이 있는 항목은 건드리지 않으므로 반복 호출해도 결과가 같습니다.
    pub async fn refresh_valuations(&self, investor_id: &ObjectId) -> Result<RevaluationResponse, AppError> {
        let investor = self.investor_repo
            .find_fresh(investor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("투자자 프로필을 찾을 수 없습니다".to_string()))?;

        let founders = self.founders_for(&investor.investment_portfolio).await?;
        let pending = missing_valuations(&investor.investment_portfolio, &founders);

        let updated_entries = if pending.is_empty() {
            0
        } else {
            self.investor_repo.fill_current_values(investor_id, &pending).await?
        };

        if updated_entries > 0 {
            info!("포트폴리오 평가액 갱신: 투자자 {} ({}건)", investor_id, updated_entries);
        }

        let refreshed = self.investor_repo
            .find_fresh(investor_id)
            .await?
            .map(|investor| investor.investment_portfolio)
            .unwrap_or_default();

        Ok(RevaluationResponse {
            updated_entries,
            portfolio_summary: summarize_portfolio(&refreshed, &founders),
        })
    }
}
