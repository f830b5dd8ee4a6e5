//! 지원금 공고

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    pub description: String,

    pub amount: f64,

    pub category: String,

    pub region: String,

    /// 신청 마감 시각. 지난 공고에는 신청할 수 없습니다.
    pub deadline: DateTime,

    #[serde(default)]
    pub eligibility: Vec<String>,

    pub created_by: ObjectId,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

impl Grant {
    pub fn is_open_at(&self, at: DateTime) -> bool {
        at.timestamp_millis() <= self.deadline.timestamp_millis()
    }
}
