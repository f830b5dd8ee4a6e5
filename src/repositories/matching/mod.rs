//! 매칭 점수와 투자자 활동 로그 리포지토리

pub mod activity_repo;
pub mod match_repo;

pub use activity_repo::ActivityRepository;
pub use match_repo::{MatchRepository, StoredMatch};
