//! 지원금 공고와 신청서 리포지토리

pub mod grant_application_repo;
pub mod grant_repo;

pub use grant_application_repo::GrantApplicationRepository;
pub use grant_repo::GrantRepository;
