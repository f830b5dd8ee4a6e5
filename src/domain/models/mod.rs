//! 요청 처리 과정에서만 쓰이는 비영속 모델 (인증 컨텍스트, 토큰 클레임)

pub mod auth;
pub mod token;
