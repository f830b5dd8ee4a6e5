//! 창업자/투자자 프로필 리포지토리
//!
//! 두 프로필 모두 사용자 ID(`user_id`)로 조회하며 사용자당 하나만 존재합니다.

pub mod founder_repo;
pub mod investor_repo;

pub use founder_repo::FounderRepository;
pub use investor_repo::InvestorRepository;
