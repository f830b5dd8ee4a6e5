//! 창업자 대시보드 서비스

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use log::debug;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;

use crate::{
    core::errors::AppError,
    domain::{
        dto::dashboard::{FounderDashboard, InvestorEngagement},
        entities::{deals::DealStage, to_bson_datetime},
    },
    repositories::{
        deals::{DealRepository, InvestmentRepository},
        matching::MatchRepository,
        profiles::FounderRepository,
    },
    services::dashboard::calculations::summarize_fundraising,
};

/// 이 점수를 넘는 매칭을 상위 매칭으로 봅니다.
pub const TOP_MATCH_THRESHOLD: f64 = 70.0;

/// 해당 월 1일 00:00 (UTC)
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc())
        .unwrap_or(now)
}

#[service(name = "founderdashboard")]
pub struct FounderDashboardService {
    founder_repo: Arc<FounderRepository>,
    investment_repo: Arc<InvestmentRepository>,
    match_repo: Arc<MatchRepository>,
    deal_repo: Arc<DealRepository>,
}

impl FounderDashboardService {
    pub async fn dashboard(&self, founder_id: &ObjectId) -> Result<FounderDashboard, AppError> {
        let founder = self.founder_repo
            .find_by_user_id(founder_id)
            .await?
            .ok_or_else(|| AppError::NotFound("창업자 프로필을 찾을 수 없습니다".to_string()))?;

        let investments = self.investment_repo.find_by_founder(founder_id).await?;
        let fundraising_summary = summarize_fundraising(founder.fund_required, &investments);

        let investor_engagement = self.engagement(founder_id).await?;
        debug!("창업자 대시보드 집계: {} (투자 {}건)", founder_id, investments.len());

        Ok(FounderDashboard {
            fundraising_summary,
            investor_engagement,
        })
    }

    async fn engagement(&self, founder_id: &ObjectId) -> Result<InvestorEngagement, AppError> {
        let since = to_bson_datetime(month_start(Utc::now()));

        Ok(InvestorEngagement {
            total_matches: self.match_repo.count_for_founder(founder_id).await?,
            new_this_month: self.match_repo.count_for_founder_since(founder_id, since).await?,
            in_due_diligence: self.deal_repo
                .count_for_startup_in_stage(founder_id, DealStage::DueDiligence)
                .await?,
            top_matches: self.match_repo
                .count_for_founder_above(founder_id, TOP_MATCH_THRESHOLD)
                .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_start() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 17, 45, 12).unwrap();
        assert_eq!(month_start(now), Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
    }
}
