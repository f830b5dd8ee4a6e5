//! 딜 플로우 요청 DTO
//!
//! 단계/상태 값은 문자열로 받아 서비스에서 열거형으로 파싱합니다.
//! 정의되지 않은 값은 `ValidationError`(400)가 됩니다.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
pub struct AddDealRequest {
    /// 창업자 사용자 ID
    #[validate(custom(function = "crate::domain::dto::validate_object_id"))]
    pub startup_id: String,

    #[validate(range(min = 0.0, max = 100.0, message = "매칭 점수는 0-100 사이여야 합니다"))]
    pub match_score: Option<f64>,

    /// 생략하면 창업자 프로필의 모집 금액을 사용합니다.
    #[validate(range(min = 0.0, message = "모집 금액은 0 이상이어야 합니다"))]
    pub fund_required: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStageRequest {
    #[validate(length(min = 1, message = "단계를 입력해주세요"))]
    pub stage: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "상태를 입력해주세요"))]
    pub status: String,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_meeting_window"))]
pub struct CreateMeetingRequest {
    #[validate(length(min = 1, max = 200, message = "미팅 제목은 1-200자 사이여야 합니다"))]
    #[validate(custom(function = "crate::domain::dto::validate_not_blank"))]
    pub title: String,

    pub start_time: DateTime<Utc>,

    pub end_time: DateTime<Utc>,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

fn validate_meeting_window(req: &CreateMeetingRequest) -> Result<(), ValidationError> {
    if req.end_time <= req.start_time {
        return Err(ValidationError::new("invalid_meeting_window")
            .with_message("미팅 종료 시간은 시작 시간 이후여야 합니다".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeetingStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddDocumentRequest {
    #[validate(length(min = 1, max = 200, message = "문서 이름은 1-200자 사이여야 합니다"))]
    pub name: String,

    #[validate(url(message = "유효한 문서 URL을 입력해주세요"))]
    pub url: String,

    #[validate(length(min = 1, max = 50))]
    pub doc_type: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "태스크 제목은 1-200자 사이여야 합니다"))]
    #[validate(custom(function = "crate::domain::dto::validate_not_blank"))]
    pub title: String,

    pub due_date: Option<DateTime<Utc>>,

    /// `low` | `medium` | `high` (기본값 `medium`)
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    pub completed: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddNoteRequest {
    #[validate(length(min = 1, max = 10000, message = "노트 내용을 입력해주세요"))]
    #[validate(custom(function = "crate::domain::dto::validate_not_blank"))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct InvestRequest {
    #[validate(custom(function = "crate::domain::dto::validate_positive_amount"))]
    pub amount: f64,
}
