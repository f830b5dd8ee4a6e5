//! # Application Error Handling
//!
//! 딜 플로우 백엔드 전역에서 사용하는 에러 타입입니다.
//! 모든 계층(리포지토리, 서비스, 핸들러)은 `AppError`를 반환하고,
//! Actix-Web의 `ResponseError` 구현을 통해 HTTP 응답으로 자동 변환됩니다.
//!
//! ## 에러 분류와 HTTP 상태 코드
//!
//! | 분류 | 변형 | 상태 코드 |
//! |------|------|-----------|
//! | 엔티티 없음 | `NotFound` | 404 |
//! | 중복 (딜/매치/신청 등) | `ConflictError` | 409 |
//! | 잘못된 입력 (ID 형식, 필수 필드, enum 값) | `ValidationError` | 400 |
//! | 인증 실패 | `AuthenticationError` | 401 |
//! | 권한 부족 | `AuthorizationError` | 403 |
//! | 외부 서비스 실패 (스코어링, 캘린더) | `ExternalServiceError` | 500 |
//! | 저장소 실패 | `DatabaseError`, `RedisError` | 500 |
//! | 기타 | `InternalError` | 500 |
//!
//! 응답 본문은 항상 `{"error": "<메시지>"}` 형태입니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn get_deal(&self, id: &str) -> Result<Deal, AppError> {
//!     self.deal_repo
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("딜을 찾을 수 없습니다".to_string()))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 각 변형은 사람이 읽을 수 있는 메시지를 담고 있으며,
/// `Display` 출력이 그대로 HTTP 응답의 `error` 필드가 됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB 연결/쿼리/트랜잭션 실패
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 실패
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 실패
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 요청한 리소스 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 유니크 제약 위반
    #[error("Conflict error: {0}")]
    ConflictError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 스코어링 서비스 또는 캘린더 연동 실패
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        AppError::DatabaseError(error.to_string())
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(error: mongodb::bson::de::Error) -> Self {
        AppError::DatabaseError(format!("문서 역직렬화 실패: {}", error))
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(error: mongodb::bson::ser::Error) -> Self {
        AppError::DatabaseError(format!("문서 직렬화 실패: {}", error))
    }
}

/// `Result<T, AppError>` 축약형
pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 문맥 메시지를 덧붙여 `AppError::InternalError`로 변환하는 확장 트레이트
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("invalid stage".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("deal".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let error = AppError::ConflictError("deal already exists".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_auth_errors_response() {
        assert_eq!(
            AppError::AuthenticationError("token".to_string()).error_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::AuthorizationError("role".to_string()).error_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_upstream_and_store_failures_are_500() {
        for error in [
            AppError::ExternalServiceError("scoring down".to_string()),
            AppError::DatabaseError("write failed".to_string()),
            AppError::RedisError("timeout".to_string()),
            AppError::InternalError("boom".to_string()),
        ] {
            assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            _ => panic!("Expected InternalError"),
        }
    }
}
