//! # 요청/응답 DTO
//!
//! 요청 DTO는 `validator::Validate`로 형식을 검증하고, 응답 DTO는 엔티티에서 변환되며
//! `ObjectId`를 16진수 문자열로, 시각을 RFC 3339 문자열로 내보냅니다.
//!
//! 대시보드 계열 응답(`dashboard`)은 프런트엔드 계약에 맞춰 camelCase 키를 사용합니다.

pub mod users;
pub mod profiles;
pub mod deals;
pub mod matching;
pub mod dashboard;
pub mod notifications;
pub mod grants;

use validator::ValidationError;

/// 공백만으로 이루어진 문자열 거부
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message("공백만 입력할 수 없습니다".into()));
    }
    Ok(())
}

/// 0보다 큰 유한한 금액
pub(crate) fn validate_positive_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::new("non_positive_amount")
            .with_message("금액은 0보다 커야 합니다".into()));
    }
    Ok(())
}

/// 24자리 16진수 ObjectId 문자열
pub(crate) fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    if mongodb::bson::oid::ObjectId::parse_str(value).is_err() {
        return Err(ValidationError::new("invalid_object_id")
            .with_message("유효하지 않은 ID 형식입니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_validators() {
        assert!(validate_not_blank("hello").is_ok());
        assert!(validate_not_blank("   ").is_err());

        assert!(validate_positive_amount(0.01).is_ok());
        assert!(validate_positive_amount(0.0).is_err());
        assert!(validate_positive_amount(-5.0).is_err());
        assert!(validate_positive_amount(f64::NAN).is_err());

        assert!(validate_object_id("507f1f77bcf86cd799439011").is_ok());
        assert!(validate_object_id("507f").is_err());
    }
}
