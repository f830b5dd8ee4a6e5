//! 프로필 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::profiles::{Founder, Investor, PortfolioEntry};
use crate::domain::entities::to_chrono_datetime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FounderResponse {
    pub id: String,
    pub user_id: String,
    pub startup_name: String,
    pub mission_statement: Option<String>,
    pub industry: Option<String>,
    pub funding_stage: Option<String>,
    pub business_model: Option<String>,
    pub revenue_streams: Option<String>,
    pub traction: Option<String>,
    pub scaling_potential: Option<String>,
    pub competition: Option<String>,
    pub leadership_team: Option<String>,
    pub team_size: Option<i32>,
    pub location: Option<String>,
    pub startup_website: Option<String>,
    pub pitch_deck: Option<String>,
    pub growth_rate: Option<f64>,
    pub fund_required: Option<f64>,
    pub total_invested: f64,
    pub updated_at: DateTime<Utc>,
}

impl From<Founder> for FounderResponse {
    fn from(founder: Founder) -> Self {
        Self {
            id: founder.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: founder.user_id.to_hex(),
            startup_name: founder.startup_name,
            mission_statement: founder.mission_statement,
            industry: founder.industry,
            funding_stage: founder.funding_stage,
            business_model: founder.business_model,
            revenue_streams: founder.revenue_streams,
            traction: founder.traction,
            scaling_potential: founder.scaling_potential,
            competition: founder.competition,
            leadership_team: founder.leadership_team,
            team_size: founder.team_size,
            location: founder.location,
            startup_website: founder.startup_website,
            pitch_deck: founder.pitch_deck,
            growth_rate: founder.growth_rate,
            fund_required: founder.fund_required,
            total_invested: founder.total_invested,
            updated_at: to_chrono_datetime(founder.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioEntryResponse {
    pub startup_id: String,
    pub amount: f64,
    pub current_value: Option<f64>,
    pub deal_id: Option<String>,
    pub invested_at: Option<DateTime<Utc>>,
}

impl From<PortfolioEntry> for PortfolioEntryResponse {
    fn from(entry: PortfolioEntry) -> Self {
        Self {
            startup_id: entry.startup_id.to_hex(),
            amount: entry.amount,
            current_value: entry.current_value,
            deal_id: entry.deal_id.map(|id| id.to_hex()),
            invested_at: entry.invested_at.map(to_chrono_datetime),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorResponse {
    pub id: String,
    pub user_id: String,
    pub investor_type: Option<String>,
    pub thesis: Option<String>,
    pub preferred_funding_stage: Option<String>,
    pub investment_range: Option<String>,
    pub investment_frequency: Option<String>,
    pub risk_tolerance: Option<String>,
    pub exit_strategy: Option<String>,
    pub preferred_industries: Vec<String>,
    pub preferred_regions: Vec<String>,
    pub total_invested: f64,
    pub investment_portfolio: Vec<PortfolioEntryResponse>,
    pub updated_at: DateTime<Utc>,
}

impl From<Investor> for InvestorResponse {
    fn from(investor: Investor) -> Self {
        Self {
            id: investor.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: investor.user_id.to_hex(),
            investor_type: investor.investor_type,
            thesis: investor.thesis,
            preferred_funding_stage: investor.preferred_funding_stage,
            investment_range: investor.investment_range,
            investment_frequency: investor.investment_frequency,
            risk_tolerance: investor.risk_tolerance,
            exit_strategy: investor.exit_strategy,
            preferred_industries: investor.preferred_industries,
            preferred_regions: investor.preferred_regions,
            total_invested: investor.total_invested,
            investment_portfolio: investor
                .investment_portfolio
                .into_iter()
                .map(PortfolioEntryResponse::from)
                .collect(),
            updated_at: to_chrono_datetime(investor.updated_at),
        }
    }
}
