//! 투자자 대시보드 응답
//!
//! ```json
//! {
//!   "portfolioSummary": { "totalInvested": 150000.0, "totalStartups": 3, "averageInvestment": 50000.0, "topPerformers": [...] },
//!   "pipelineSummary":  { "totalDeals": 7, "pendingDeals": 5, "closedDeals": 2, "recentDeals": [...] },
//!   "recentActivities": [ { "type": "match", "description": "New match with 81% compatibility", ... } ]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::deals::{DealStage, DealStatus};
use crate::domain::entities::matching::{Activity, ActivityType};
use crate::domain::entities::to_chrono_datetime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub startup_id: String,
    pub startup_name: Option<String>,
    pub industry: Option<String>,
    pub invested: f64,
    pub current_value: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_invested: f64,
    pub total_current_value: f64,
    pub total_startups: usize,
    pub average_investment: f64,
    pub top_performers: Vec<TopPerformer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentDeal {
    pub deal_id: String,
    pub startup_id: String,
    pub founder_name: Option<String>,
    pub startup_name: Option<String>,
    pub industry: Option<String>,
    pub stage: DealStage,
    pub status: DealStatus,
    pub match_score: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    pub total_deals: u64,
    pub pending_deals: u64,
    pub closed_deals: u64,
    pub recent_deals: Vec<RecentDeal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id.map(|id| id.to_hex()).unwrap_or_default(),
            activity_type: activity.activity_type,
            description: activity.description,
            date: to_chrono_datetime(activity.date),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorDashboard {
    pub portfolio_summary: PortfolioSummary,
    pub pipeline_summary: PipelineSummary,
    pub recent_activities: Vec<ActivityResponse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub annualized_return: f64,
    pub volatility: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResponse {
    pub period: String,
    pub performance_data: Vec<PerformancePoint>,
    pub metrics: PerformanceMetrics,
    /// 평가 이력이 없어 임시 시계열을 생성했는지 여부
    pub synthetic: bool,
}

/// 평가 갱신 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevaluationResponse {
    pub updated_entries: usize,
    pub portfolio_summary: PortfolioSummary,
}

#[derive(Debug, Deserialize)]
pub struct PerformanceQuery {
    pub period: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_uses_camel_case_keys() {
        let dashboard = InvestorDashboard {
            portfolio_summary: PortfolioSummary::default(),
            pipeline_summary: PipelineSummary::default(),
            recent_activities: vec![],
        };

        let json = serde_json::to_value(dashboard).unwrap();
        assert!(json.get("portfolioSummary").is_some());
        assert_eq!(json["portfolioSummary"]["totalStartups"], 0);
        assert_eq!(json["pipelineSummary"]["recentDeals"], serde_json::json!([]));
        assert!(json.get("recentActivities").is_some());
    }
}
