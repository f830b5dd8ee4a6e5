//! JWT 클레임

use serde::{Deserialize, Serialize};

/// 액세스 토큰 클레임
///
/// 역할 목록은 발급 시점 기준입니다. 역할이 추가되면 새 토큰을 발급받아야 합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID (ObjectId 16진수)
    pub sub: String,

    pub roles: Vec<String>,

    pub iat: i64,

    pub exp: i64,

    /// 토큰 고유 ID (UUID v4)
    pub jti: String,
}

/// 발급된 액세스 토큰
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: i64,
}
