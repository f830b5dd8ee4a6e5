//! 폐기된 액세스 토큰 목록 (Redis)
//!
//! ```rust,ignore
//! use crate::repositories::tokens::TokenRepository;
//!
//! let token_repo = TokenRepository::instance();
//! token_repo.revoke(&claims.jti, &claims.sub, 3600).await?;
//! assert!(token_repo.is_revoked(&claims.jti).await?);
//! ```

pub mod token_repo;

pub use token_repo::{RevocationList, TokenRepository};
