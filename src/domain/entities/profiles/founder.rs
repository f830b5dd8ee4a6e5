//! 창업자(스타트업) 프로필
//!
//! 사용자와 1:1이며 `user_id`로 참조합니다. `total_invested`는 투자 실행 시에만 증가합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Founder {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub user_id: ObjectId,

    #[serde(default)]
    pub startup_name: String,

    pub mission_statement: Option<String>,

    /// 산업 분류 (예: `"Fintech"`)
    pub industry: Option<String>,

    /// 투자 단계 (예: `"Seed"`, `"Series A"`)
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

    /// 피치덱 파일 참조 (URL 또는 저장소 키)
    pub pitch_deck: Option<String>,

    /// 연 성장률 (%). 포트폴리오 현재 가치 추정에 사용됩니다.
    pub growth_rate: Option<f64>,

    /// 모집 목표 금액. 투자 실행 시 딜의 잔여 금액과 별개로 유지됩니다.
    pub fund_required: Option<f64>,

    #[serde(default)]
    pub total_invested: f64,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

impl Founder {
    /// 역할 부여 시 생성되는 빈 프로필
    pub fn new_empty(user_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id,
            startup_name: String::new(),
            mission_statement: None,
            industry: None,
            funding_stage: None,
            business_model: None,
            revenue_streams: None,
            traction: None,
            scaling_potential: None,
            competition: None,
            leadership_team: None,
            team_size: None,
            location: None,
            startup_website: None,
            pitch_deck: None,
            growth_rate: None,
            fund_required: None,
            total_invested: 0.0,
            created_at: now,
            updated_at: now,
        }
    }
}
