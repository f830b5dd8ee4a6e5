//! 딜 단계(stage)와 상태(status)
//!
//! 두 값은 서로 독립적인 열거형입니다. 어떤 값에서 어떤 값으로든 전환할 수 있으며
//! 정의되지 않은 문자열만 거부됩니다.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;

/// 파이프라인 단계
///
/// 이전 데이터의 `closed_won` / `closed_lost`는 읽을 때 `Closed`로 취급합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealStage {
    #[serde(rename = "screening")]
    Screening,
    #[serde(rename = "dueDiligence", alias = "due_diligence")]
    DueDiligence,
    #[serde(rename = "negotiation")]
    Negotiation,
    #[serde(rename = "closed", alias = "closed_won", alias = "closed_lost")]
    Closed,
}

impl DealStage {
    pub const ALL: [DealStage; 4] = [
        DealStage::Screening,
        DealStage::DueDiligence,
        DealStage::Negotiation,
        DealStage::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::Screening => "screening",
            DealStage::DueDiligence => "dueDiligence",
            DealStage::Negotiation => "negotiation",
            DealStage::Closed => "closed",
        }
    }

    /// 요청 값 파싱. 정의되지 않은 값은 `ValidationError`.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim() {
            "screening" => Ok(DealStage::Screening),
            "dueDiligence" | "due_diligence" => Ok(DealStage::DueDiligence),
            "negotiation" => Ok(DealStage::Negotiation),
            "closed" | "closed_won" | "closed_lost" => Ok(DealStage::Closed),
            other => Err(AppError::ValidationError(format!(
                "유효하지 않은 딜 단계입니다: {} (허용: screening, dueDiligence, negotiation, closed)",
                other
            ))),
        }
    }

    /// 저장 문서에서 이 단계로 읽히는 모든 원시 값
    pub fn stored_values(&self) -> &'static [&'static str] {
        match self {
            DealStage::Screening => &["screening"],
            DealStage::DueDiligence => &["dueDiligence", "due_diligence"],
            DealStage::Negotiation => &["negotiation"],
            DealStage::Closed => &["closed", "closed_won", "closed_lost"],
        }
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 딜 진행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl DealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Active => "active",
            DealStatus::Paused => "paused",
            DealStatus::Completed => "completed",
            DealStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim() {
            "active" => Ok(DealStatus::Active),
            "paused" => Ok(DealStatus::Paused),
            "completed" => Ok(DealStatus::Completed),
            "cancelled" => Ok(DealStatus::Cancelled),
            other => Err(AppError::ValidationError(format!(
                "유효하지 않은 딜 상태입니다: {} (허용: active, paused, completed, cancelled)",
                other
            ))),
        }
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parse_accepts_every_stage() {
        for stage in DealStage::ALL {
            assert_eq!(DealStage::parse(stage.as_str()).unwrap(), stage);
        }
    }

    #[test]
    fn test_stage_parse_rejects_unknown() {
        assert!(matches!(DealStage::parse("won"), Err(AppError::ValidationError(_))));
        assert!(matches!(DealStage::parse("Screening"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_legacy_closed_values_read_as_closed() {
        let won: DealStage = serde_json::from_str("\"closed_won\"").unwrap();
        let lost: DealStage = serde_json::from_str("\"closed_lost\"").unwrap();
        assert_eq!(won, DealStage::Closed);
        assert_eq!(lost, DealStage::Closed);
        assert_eq!(serde_json::to_string(&DealStage::Closed).unwrap(), "\"closed\"");
        assert!(DealStage::Closed.stored_values().contains(&"closed_won"));
    }

    #[test]
    fn test_stage_serializes_camel_case() {
        assert_eq!(serde_json::to_string(&DealStage::DueDiligence).unwrap(), "\"dueDiligence\"");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(DealStatus::parse("paused").unwrap(), DealStatus::Paused);
        assert!(DealStatus::parse("archived").is_err());
        assert_eq!(serde_json::to_string(&DealStatus::Cancelled).unwrap(), "\"cancelled\"");
    }
}
