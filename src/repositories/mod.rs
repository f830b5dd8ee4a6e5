//! # Repositories
//!
//! 컬렉션마다 하나씩 있는 타입 지정 데이터 액세스 계층입니다.
//! 모두 `#[repository]` 매크로로 선언되어 `Arc<Database>`와 `Arc<RedisClient>`를 주입받습니다.
//! `TokenRepository`만 예외로 Redis만 사용합니다.
//!
//! | 리포지토리 | 컬렉션 | 캐시 |
//! |-----------|--------|------|
//! | `UserRepository` | `users` | ID, 이메일 |
//! | `FounderRepository` | `founders` | 사용자 ID |
//! | `InvestorRepository` | `investors` | 사용자 ID |
//! | `DealRepository` | `deals` | - |
//! | `InvestmentRepository` | `investments` | - |
//! | `MatchRepository` | `matches` | - |
//! | `ActivityRepository` | `activities` | - |
//! | `NotificationRepository` | `notifications` | - |
//! | `ValuationRepository` | `portfolio_valuations` | - |
//! | `GrantRepository` | `grants` | - |
//! | `GrantApplicationRepository` | `grant_applications` | - |
//! | `TokenRepository` | - (Redis 전용) | 폐기된 토큰 `jti` |
//!
//! 집계 결과는 캐시하지 않습니다.

pub mod users;
pub mod profiles;
pub mod deals;
pub mod matching;
pub mod notifications;
pub mod performance;
pub mod grants;
pub mod tokens;

use mongodb::error::{Error, ErrorKind, WriteFailure};

use crate::core::errors::AppError;

const DUPLICATE_KEY_CODE: i32 = 11000;

/// 유니크 인덱스 위반(E11000) 여부
pub(crate) fn is_duplicate_key(error: &Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// 쓰기 오류 변환. 중복 키는 `ConflictError`, 나머지는 `DatabaseError`.
pub(crate) fn map_write_error(error: Error, conflict_message: &str) -> AppError {
    if is_duplicate_key(&error) {
        AppError::ConflictError(conflict_message.to_string())
    } else {
        AppError::DatabaseError(error.to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use mongodb::bson::{self, doc};
    use mongodb::error::{CommandError, WriteError};

    use super::*;

    pub(crate) fn duplicate_key_error() -> Error {
        let write_error: WriteError = bson::from_document(doc! {
            "code": DUPLICATE_KEY_CODE,
            "errmsg": "E11000 duplicate key error collection: dealflow_dev.deals",
        })
        .unwrap();
        Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    pub(crate) fn io_error() -> Error {
        Error::from(ErrorKind::Io(Arc::new(std::io::Error::other("connection reset"))))
    }

    #[test]
    fn test_duplicate_key_detection() {
        assert!(is_duplicate_key(&duplicate_key_error()));
        assert!(!is_duplicate_key(&io_error()));

        let command_error: CommandError = bson::from_document(doc! {
            "code": DUPLICATE_KEY_CODE,
            "codeName": "DuplicateKey",
            "errmsg": "E11000 duplicate key error",
        })
        .unwrap();
        assert!(is_duplicate_key(&Error::from(ErrorKind::Command(command_error))));

        let other_write: WriteError = bson::from_document(doc! { "code": 121, "errmsg": "Document failed validation" })
            .unwrap();
        assert!(!is_duplicate_key(&Error::from(ErrorKind::Write(WriteFailure::WriteError(other_write)))));
    }

    #[test]
    fn test_map_write_error() {
        match map_write_error(duplicate_key_error(), "이미 존재합니다") {
            AppError::ConflictError(message) => assert_eq!(message, "이미 존재합니다"),
            other => panic!("expected conflict, got {:?}", other),
        }

        assert!(matches!(map_write_error(io_error(), "이미 존재합니다"), AppError::DatabaseError(_)));
    }
}
