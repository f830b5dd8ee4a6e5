//! 프로필 수정 요청
//!
//! 모든 필드는 선택이며, 값이 있는 필드만 `$set` 문서에 들어갑니다.
//! `total_invested`와 포트폴리오는 투자 실행으로만 바뀌므로 요청에 없습니다.

use mongodb::bson::{doc, Bson, Document};
use serde::Deserialize;
use validator::Validate;

fn set_if_some<T: Into<Bson> + Clone>(changes: &mut Document, key: &str, value: &Option<T>) {
    if let Some(v) = value {
        changes.insert(key, v.clone().into());
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateFounderRequest {
    #[validate(length(min = 1, max = 120, message = "스타트업 이름은 1-120자 사이여야 합니다"))]
    pub startup_name: Option<String>,

    #[validate(length(max = 2000))]
    pub mission_statement: Option<String>,

    #[validate(length(min = 1, max = 60))]
    pub industry: Option<String>,

    #[validate(length(min = 1, max = 40))]
    pub funding_stage: Option<String>,

    pub business_model: Option<String>,

    pub revenue_streams: Option<String>,

    pub traction: Option<String>,

    pub scaling_potential: Option<String>,

    pub competition: Option<String>,

    pub leadership_team: Option<String>,

    #[validate(range(min = 1, max = 100000, message = "팀 규모는 1 이상이어야 합니다"))]
    pub team_size: Option<i32>,

    pub location: Option<String>,

    #[validate(url(message = "유효한 URL을 입력해주세요"))]
    pub startup_website: Option<String>,

    pub pitch_deck: Option<String>,

    #[validate(range(min = -100.0, max = 10000.0, message = "성장률은 -100% 이상이어야 합니다"))]
    pub growth_rate: Option<f64>,

    #[validate(range(min = 0.0, message = "모집 금액은 0 이상이어야 합니다"))]
    pub fund_required: Option<f64>,
}

impl UpdateFounderRequest {
    pub fn changes(&self) -> Document {
        let mut changes = doc! {};
        set_if_some(&mut changes, "startup_name", &self.startup_name);
        set_if_some(&mut changes, "mission_statement", &self.mission_statement);
        set_if_some(&mut changes, "industry", &self.industry);
        set_if_some(&mut changes, "funding_stage", &self.funding_stage);
        set_if_some(&mut changes, "business_model", &self.business_model);
        set_if_some(&mut changes, "revenue_streams", &self.revenue_streams);
        set_if_some(&mut changes, "traction", &self.traction);
        set_if_some(&mut changes, "scaling_potential", &self.scaling_potential);
        set_if_some(&mut changes, "competition", &self.competition);
        set_if_some(&mut changes, "leadership_team", &self.leadership_team);
        set_if_some(&mut changes, "team_size", &self.team_size);
        set_if_some(&mut changes, "location", &self.location);
        set_if_some(&mut changes, "startup_website", &self.startup_website);
        set_if_some(&mut changes, "pitch_deck", &self.pitch_deck);
        set_if_some(&mut changes, "growth_rate", &self.growth_rate);
        set_if_some(&mut changes, "fund_required", &self.fund_required);
        changes
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateInvestorRequest {
    pub investor_type: Option<String>,

    #[validate(length(max = 2000))]
    pub thesis: Option<String>,

    #[validate(length(min = 1, max = 40))]
    pub preferred_funding_stage: Option<String>,

    pub investment_range: Option<String>,

    pub investment_frequency: Option<String>,

    pub risk_tolerance: Option<String>,

    pub exit_strategy: Option<String>,

    #[validate(length(max = 50, message = "선호 산업은 최대 50개까지 지정할 수 있습니다"))]
    pub preferred_industries: Option<Vec<String>>,

    #[validate(length(max = 50))]
    pub preferred_regions: Option<Vec<String>>,
}

impl UpdateInvestorRequest {
    pub fn changes(&self) -> Document {
        let mut changes = doc! {};
        set_if_some(&mut changes, "investor_type", &self.investor_type);
        set_if_some(&mut changes, "thesis", &self.thesis);
        set_if_some(&mut changes, "preferred_funding_stage", &self.preferred_funding_stage);
        set_if_some(&mut changes, "investment_range", &self.investment_range);
        set_if_some(&mut changes, "investment_frequency", &self.investment_frequency);
        set_if_some(&mut changes, "risk_tolerance", &self.risk_tolerance);
        set_if_some(&mut changes, "exit_strategy", &self.exit_strategy);
        set_if_some(&mut changes, "preferred_industries", &self.preferred_industries);
        set_if_some(&mut changes, "preferred_regions", &self.preferred_regions);
        changes
    }
}
