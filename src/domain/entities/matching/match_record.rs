//! 매칭 기록
//!
//! (투자자, 창업자) 쌍마다 하나만 존재하며, 다시 점수를 매기면 같은 문서의
//! `match_percentage`와 `updated_at`만 갱신됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub founder_id: ObjectId,

    pub investor_id: ObjectId,

    /// 0-100 범위 백분율
    pub match_percentage: f64,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub bookmark: bool,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}
