//! 창업자/투자자 프로필 조회와 수정

pub mod profile_service;

pub use profile_service::ProfileService;
