//! 지원금 공고와 신청 관리

pub mod grant_service;

pub use grant_service::GrantService;
