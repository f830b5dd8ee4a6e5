//! # 토큰 폐기 리포지토리
//!
//! 로그아웃된 토큰의 `jti`를 토큰 만료 시각까지 Redis에 보관합니다.
//! 만료가 지난 토큰은 서명 검증에서 이미 거부되므로 키도 함께 사라집니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
};

/// 폐기 기록
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedToken {
    pub user_id: String,
    pub revoked_at: i64,
}

/// 폐기된 토큰 조회 경계
#[async_trait]
pub trait RevocationList: Send + Sync {
    async fn is_revoked(&self, jti: &str) -> Result<bool, AppError>;
}

#[repository(name = "token", collection = "revoked_tokens")]
pub struct TokenRepository {
    redis: Arc<RedisClient>,
}

fn revoked_key(jti: &str) -> String {
    format!("revoked_token:{}", jti)
}

impl TokenRepository {
    /// `ttl_seconds` 동안 `jti`를 폐기 상태로 기록
    pub async fn revoke(&self, jti: &str, user_id: &str, ttl_seconds: usize) -> Result<(), AppError> {
        let record = RevokedToken {
            user_id: user_id.to_string(),
            revoked_at: Utc::now().timestamp(),
        };

        self.redis
            .set_with_expiry(&revoked_key(jti), &record, ttl_seconds)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        log::info!("토큰 폐기: 사용자 {} (jti {}, {}초)", user_id, jti, ttl_seconds);
        Ok(())
    }
}

#[async_trait]
impl RevocationList for TokenRepository {
    async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
        self.redis
            .exists(&revoked_key(jti))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revoked_key() {
        assert_eq!(revoked_key("2f1c"), "revoked_token:2f1c");
    }
}
