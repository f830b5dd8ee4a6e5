//! # JWT 토큰 서비스
//!
//! HS256 액세스 토큰을 발급하고 검증합니다. 리프레시 토큰은 없으며
//! 만료 후에는 다시 로그인해야 합니다.
//!
//! ## 클레임
//!
//! | 필드 | 내용 |
//! |------|------|
//! | `sub` | 사용자 ID |
//! | `roles` | 발급 시점의 역할 목록 |
//! | `iat` / `exp` | 발급/만료 시각 (Unix 초) |
//! | `jti` | UUID v4 |

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    core::errors::AppError,
    domain::{
        entities::users::User,
        models::token::{AccessToken, TokenClaims},
    },
};

#[service(name = "token")]
pub struct TokenService {}

impl TokenService {
    pub fn issue_access_token(&self, user: &User) -> Result<AccessToken, AppError> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let access_token = encode_claims(&user_id, &user.roles, JwtConfig::expiration_hours(), &JwtConfig::secret())?;

        Ok(AccessToken {
            access_token,
            expires_in: JwtConfig::expiration_hours() * 3600,
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        decode_claims(token, &JwtConfig::secret())
    }

    /// `Authorization` 헤더 값에서 토큰을 꺼내 서명과 만료를 검증
    ///
    /// 폐기 여부는 확인하지 않습니다. 인증 미들웨어가 `TokenRepository`로 따로 확인합니다.
    pub fn verify_bearer(&self, auth_header: &str) -> Result<TokenClaims, AppError> {
        let token = extract_bearer_token(auth_header)?;
        self.verify_token(token)
    }
}

/// 토큰 만료까지 남은 시간 (초, 최소 1)
pub(crate) fn remaining_ttl(exp: i64, now: i64) -> usize {
    (exp - now).max(1) as usize
}

fn encode_claims(user_id: &str, roles: &[String], hours: i64, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        roles: roles.to_vec(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(hours)).timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
}

fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims, AppError> {
    decode::<TokenClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::AuthenticationError("토큰이 만료되었습니다".to_string()),
            _ => AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()),
        })
}

fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip_keeps_roles() {
        let roles = vec!["user".to_string(), "investor".to_string()];
        let token = encode_claims("64b7f0c2a1b2c3d4e5f60718", &roles, 1, SECRET).unwrap();

        let claims = decode_claims(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "64b7f0c2a1b2c3d4e5f60718");
        assert_eq!(claims.roles, roles);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let token = encode_claims("abc", &[], 1, SECRET).unwrap();
        assert!(matches!(
            decode_claims(&token, "other-secret"),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = encode_claims("abc", &[], -2, SECRET).unwrap();
        match decode_claims(&token, SECRET) {
            Err(AppError::AuthenticationError(message)) => assert!(message.contains("만료")),
            other => panic!("expected expiry error, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_remaining_ttl() {
        assert_eq!(remaining_ttl(1_700_003_600, 1_700_000_000), 3600);
        assert_eq!(remaining_ttl(1_700_000_000, 1_700_000_000), 1);
        assert_eq!(remaining_ttl(1_699_999_000, 1_700_000_000), 1);
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
    }
}
