//! 토큰 발급/검증과 로그아웃
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance();
//! let token = token_service.issue_access_token(&user)?;
//! let claims = token_service.verify_token(&token.access_token)?;
//! ```

pub mod session_service;
pub mod token_service;

pub use session_service::SessionService;
pub use token_service::TokenService;
