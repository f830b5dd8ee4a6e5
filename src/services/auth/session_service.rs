//! 로그아웃 (토큰 폐기)

use std::sync::Arc;

use chrono::Utc;
use singleton_macro::service;

use crate::{
    core::errors::AppError,
    repositories::tokens::TokenRepository,
    services::auth::token_service::{remaining_ttl, TokenService},
};

#[service(name = "session")]
pub struct SessionService {
    token_service: Arc<TokenService>,
    token_repo: Arc<TokenRepository>,
}

impl SessionService {
    /// 요청 토큰을 남은 유효 시간 동안 폐기
    ///
    /// 이미 폐기된 토큰을 다시 로그아웃해도 오류가 아닙니다.
    pub async fn logout(&self, auth_header: &str) -> Result<(), AppError> {
        let claims = self.token_service.verify_bearer(auth_header)?;
        let ttl = remaining_ttl(claims.exp, Utc::now().timestamp());

        self.token_repo.revoke(&claims.jti, &claims.sub, ttl).await
    }
}
