//! # HTTP Request Handlers
//!
//! actix-web 핸들러 함수 모음입니다. 핸들러는 요청을 검증하고 인증 주체에서 사용자 ID를 꺼낸 뒤
//! 서비스 싱글톤에 위임합니다. 비즈니스 규칙은 서비스 계층에만 있습니다.
//!
//! ```rust,ignore
//! #[get("/{deal_id}")]
//! pub async fn get_deal(
//!     user: AuthenticatedUser,
//!     deal_id: web::Path<String>,
//! ) -> Result<HttpResponse, AppError> {
//!     let deal = DealFlowService::instance()
//!         .get(&parse_object_id(&deal_id)?, &user.object_id()?)
//!         .await?;
//!     Ok(HttpResponse::Ok().json(deal))
//! }
//! ```
//!
//! | 모듈 | 경로 |
//! |------|------|
//! | `health` | `/health` |
//! | `users` | `/api/v1/users` |
//! | `auth` | `/api/v1/auth` |
//! | `founders` | `/api/v1/founder` |
//! | `investors` | `/api/v1/investor` |
//! | `matches` | `/api/v1/match` |
//! | `dealflow` | `/api/v1/dealflow` |
//! | `schedule` | `/api/v1/tasks`, `/api/v1/meetings` |
//! | `notifications` | `/api/v1/notifications` |
//! | `grants` | `/api/v1/grants` |

pub mod health;
pub mod users;
pub mod auth;
pub mod founders;
pub mod investors;
pub mod matches;
pub mod dealflow;
pub mod schedule;
pub mod notifications;
pub mod grants;

use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;

/// `validator` 검증 실패를 400으로 변환
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))
}

/// 스코프보다 좁은 역할 검사가 필요한 핸들러용
pub(crate) fn require_role(user: &AuthenticatedUser, role: &str) -> Result<(), AppError> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError(format!("{} 역할이 필요합니다", role)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::deals::InvestRequest;

    #[test]
    fn test_validate_payload_maps_to_bad_request() {
        assert!(validate_payload(&InvestRequest { amount: 100.0 }).is_ok());
        assert!(matches!(
            validate_payload(&InvestRequest { amount: -1.0 }),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_require_role() {
        let founder = AuthenticatedUser {
            user_id: "64b7f0c2a1b2c3d4e5f60718".into(),
            roles: vec!["user".into(), "founder".into()],
        };
        assert!(require_role(&founder, "founder").is_ok());
        assert!(matches!(require_role(&founder, "admin"), Err(AppError::AuthorizationError(_))));
    }
}
