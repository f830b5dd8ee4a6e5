//! 창업자 대시보드 응답

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraisingSummary {
    pub total_raised: f64,
    pub funding_goal: f64,
    /// 0 이상의 정수 백분율 (목표 초과 시 100을 넘을 수 있음)
    pub percentage_complete: i64,
    pub number_of_investors: usize,
    pub average_investment: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorEngagement {
    pub total_matches: u64,
    pub new_this_month: u64,
    pub in_due_diligence: u64,
    /// 매칭률 70% 초과
    pub top_matches: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FounderDashboard {
    pub fundraising_summary: FundraisingSummary,
    pub investor_engagement: InvestorEngagement,
}
