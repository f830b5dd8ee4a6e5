//! # 도메인 엔티티
//!
//! MongoDB 컬렉션에 저장되는 문서 구조입니다. 엔티티 간 관계는 모두 `ObjectId` 참조이며,
//! 딜이 소유하는 미팅/문서/태스크/노트만 딜 문서에 내장됩니다.
//!
//! | 모듈 | 컬렉션 |
//! |------|--------|
//! | [`users`] | `users` |
//! | [`profiles`] | `founders`, `investors` |
//! | [`deals`] | `deals`, `investments` |
//! | [`matching`] | `matches`, `activities` |
//! | [`notifications`] | `notifications` |
//! | [`performance`] | `portfolio_valuations` |
//! | [`grants`] | `grants`, `grant_applications` |
//!
//! 창업자와 투자자는 항상 **사용자 ID**로 참조됩니다 (딜의 `startup_id`는 창업자의 사용자 ID).

pub mod users;
pub mod profiles;
pub mod deals;
pub mod matching;
pub mod notifications;
pub mod performance;
pub mod grants;

use mongodb::bson::{oid::ObjectId, DateTime};

use crate::core::errors::AppError;

/// 16진수 문자열을 `ObjectId`로 변환합니다. 형식 오류는 `ValidationError`.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::ValidationError(format!("유효하지 않은 ID 형식입니다: {}", raw)))
}

pub fn to_bson_datetime(value: chrono::DateTime<chrono::Utc>) -> DateTime {
    DateTime::from_millis(value.timestamp_millis())
}

pub fn to_chrono_datetime(value: DateTime) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(parse_object_id("not-an-id"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_datetime_conversion_keeps_millis() {
        let now = chrono::Utc::now();
        let converted = to_chrono_datetime(to_bson_datetime(now));
        assert_eq!(converted.timestamp_millis(), now.timestamp_millis());
    }
}
