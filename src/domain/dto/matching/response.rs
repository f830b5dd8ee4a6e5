//! 매칭 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::matching::Match;
use crate::domain::entities::to_chrono_datetime;

/// 점수 산출 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScoreResponse {
    pub match_id: String,
    /// 0-100 백분율 (소수점 둘째 자리)
    pub match_probability: f64,
    /// 이번 호출로 새 매칭이 생성되었는지 여부
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub id: String,
    pub founder_id: String,
    pub investor_id: String,
    pub match_percentage: f64,
    pub tags: Vec<String>,
    pub bookmark: bool,
    pub startup_name: Option<String>,
    pub industry: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MatchResponse {
    pub fn new(record: Match, startup_name: Option<String>, industry: Option<String>) -> Self {
        Self {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            founder_id: record.founder_id.to_hex(),
            investor_id: record.investor_id.to_hex(),
            match_percentage: record.match_percentage,
            tags: record.tags,
            bookmark: record.bookmark,
            startup_name,
            industry,
            created_at: to_chrono_datetime(record.created_at),
            updated_at: to_chrono_datetime(record.updated_at),
        }
    }
}

impl From<Match> for MatchResponse {
    fn from(record: Match) -> Self {
        Self::new(record, None, None)
    }
}
