//! 매칭 후보 선별과 점수 산출

pub mod scoring;
pub mod matching_service;

pub use matching_service::MatchingService;
