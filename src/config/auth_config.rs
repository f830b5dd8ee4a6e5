//! 인증 토큰 설정

use std::env;

/// JWT (HS256) 설정
pub struct JwtConfig;

impl JwtConfig {
    /// 서명 키 (`JWT_SECRET`)
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "dealflow-dev-secret".to_string()
            })
    }

    /// 액세스 토큰 유효 시간 (`JWT_EXPIRATION_HOURS`, 기본 24시간)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|hours: &i64| *hours > 0)
            .unwrap_or(24)
    }
}

/// 최초 관리자 지정
pub struct AdminConfig;

impl AdminConfig {
    /// 스스로 `admin` 역할을 추가할 수 있는 이메일 목록 (`ADMIN_EMAILS`, 쉼표 구분)
    pub fn bootstrap_emails() -> Vec<String> {
        env::var("ADMIN_EMAILS")
            .map(|raw| parse_email_list(&raw))
            .unwrap_or_default()
    }
}

fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_list() {
        assert_eq!(
            parse_email_list(" Ops@Example.com, ,cto@example.com "),
            vec!["ops@example.com".to_string(), "cto@example.com".to_string()]
        );
        assert!(parse_email_list("").is_empty());
    }

    #[test]
    fn test_jwt_defaults() {
        if env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::expiration_hours(), 24);
        }
        if env::var("JWT_SECRET").is_err() {
            assert!(!JwtConfig::secret().is_empty());
        }
    }
}
