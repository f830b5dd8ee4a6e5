//! 사용자 계정 서비스
//!
//! 가입, 로그인, 역할 추가를 담당합니다. 역할 목록은 늘어나기만 하며
//! 창업자/투자자 역할을 얻는 순간 빈 프로필이 만들어집니다.

pub mod user_service;

pub use user_service::UserService;
