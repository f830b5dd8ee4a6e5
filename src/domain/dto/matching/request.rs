//! 매칭 요청 DTO

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CalculateMatchRequest {
    /// 창업자 사용자 ID
    #[validate(custom(function = "crate::domain::dto::validate_object_id"))]
    pub founder_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookmarkRequest {
    pub bookmark: bool,

    #[validate(length(max = 20, message = "태그는 최대 20개까지 지정할 수 있습니다"))]
    pub tags: Option<Vec<String>>,
}
