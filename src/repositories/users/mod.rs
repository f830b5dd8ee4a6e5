//! 사용자 계정 리포지토리
//!
//! ```rust,ignore
//! use crate::repositories::users::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_email("founder@example.com").await?;
//! ```

pub mod user_repo;

pub use user_repo::UserRepository;
