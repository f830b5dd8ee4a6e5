//! 외부 연동 및 성과 시계열 설정

use std::env;

/// 외부 매칭 스코어링 서비스
pub struct ScoringConfig;

impl ScoringConfig {
    /// 예측 엔드포인트 (`SCORING_SERVICE_URL`)
    pub fn endpoint() -> String {
        env::var("SCORING_SERVICE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:4040/predict/".to_string())
    }
}

/// 미팅 생성 시 사용하는 캘린더 연동
pub struct CalendarConfig;

impl CalendarConfig {
    /// 이벤트 생성 엔드포인트 (`CALENDAR_SERVICE_URL`)
    pub fn endpoint() -> String {
        env::var("CALENDAR_SERVICE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:4050/events/".to_string())
    }
}

/// 포트폴리오 성과 시계열
pub struct PerformanceConfig;

impl PerformanceConfig {
    /// 평가 이력이 비어 있을 때 임시 시계열을 생성할지 여부
    ///
    /// `PERFORMANCE_SYNTHETIC_FALLBACK`이 `false`/`0`/`off`면 비활성화됩니다.
    pub fn synthetic_fallback() -> bool {
        env::var("PERFORMANCE_SYNTHETIC_FALLBACK")
            .map(|v| parse_flag(&v))
            .unwrap_or(true)
    }

    /// 임시 시계열 난수 시드 (`PERFORMANCE_SEED`). 없으면 OS 엔트로피.
    pub fn seed() -> Option<u64> {
        env::var("PERFORMANCE_SEED").ok().and_then(|v| v.parse().ok())
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "false" | "0" | "off" | "no")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn test_scoring_endpoint_default() {
        if env::var("SCORING_SERVICE_URL").is_err() {
            assert_eq!(ScoringConfig::endpoint(), "http://127.0.0.1:4040/predict/");
        }
    }
}
