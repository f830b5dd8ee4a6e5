//! # 매칭 스코어링 서비스 클라이언트
//!
//! 창업자/투자자 속성을 외부 ML 서비스에 보내 매칭 확률을 받아옵니다.
//!
//! ## 요청/응답 계약
//!
//! ```text
//! POST {SCORING_SERVICE_URL}
//! {
//!   "founder":  { "fund_required": 500000.0, "industry": "Fintech", "funding_stage": "Seed" },
//!   "investor": { "total_invested": 1000000.0, "preferred_funding_stage": "Seed", "risk_tolerance": "Moderate" }
//! }
//!
//! 200 OK
//! { "match_probability": 0.8731 }
//! ```
//!
//! 재시도와 타임아웃은 두지 않습니다. 호출 실패는 `ExternalServiceError`로 매칭 생성 전체를 중단시킵니다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::core::errors::AppError;

/// 스코어링 요청의 창업자 속성 (누락 값은 호출 전에 기본값으로 채워짐)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FounderFeatures {
    pub fund_required: f64,
    pub industry: String,
    pub funding_stage: String,
}

/// 스코어링 요청의 투자자 속성
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorFeatures {
    pub total_invested: f64,
    pub preferred_funding_stage: String,
    pub risk_tolerance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub founder: FounderFeatures,
    pub investor: InvestorFeatures,
}

#[derive(Debug, Deserialize)]
struct ScoringResponse {
    match_probability: f64,
}

/// 매칭 점수 산출 경계
///
/// 반환값은 서비스가 돌려준 원시 값입니다. 백분율 정규화는 호출자가 담당합니다.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn predict(&self, request: &ScoringRequest) -> Result<f64, AppError>;
}

/// HTTP 기반 스코어링 클라이언트
pub struct ScoringClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ScoringClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// `SCORING_SERVICE_URL` 설정으로 생성
    pub fn from_env() -> Self {
        Self::new(ScoringConfig::endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MatchScorer for ScoringClient {
    async fn predict(&self, request: &ScoringRequest) -> Result<f64, AppError> {
        let response = self.http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("스코어링 서비스 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "스코어링 서비스 오류 ({}): {}", status, body
            )));
        }

        let parsed = response
            .json::<ScoringResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("스코어링 응답 파싱 실패: {}", e)))?;

        if !parsed.match_probability.is_finite() {
            return Err(AppError::ExternalServiceError(
                "스코어링 서비스가 유효하지 않은 확률을 반환했습니다".to_string(),
            ));
        }

        log::debug!("스코어링 결과: {}", parsed.match_probability);
        Ok(parsed.match_probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = ScoringRequest {
            founder: FounderFeatures {
                fund_required: 500000.0,
                industry: "Fintech".to_string(),
                funding_stage: "Seed".to_string(),
            },
            investor: InvestorFeatures {
                total_invested: 1000000.0,
                preferred_funding_stage: "Seed".to_string(),
                risk_tolerance: "Moderate".to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["founder"]["fund_required"], 500000.0);
        assert_eq!(json["founder"]["industry"], "Fintech");
        assert_eq!(json["investor"]["risk_tolerance"], "Moderate");
    }

    #[test]
    fn test_response_parsing() {
        let parsed: ScoringResponse = serde_json::from_str(r#"{"match_probability": 0.42}"#).unwrap();
        assert_eq!(parsed.match_probability, 0.42);
        assert!(serde_json::from_str::<ScoringResponse>(r#"{"score": 1}"#).is_err());
    }

    #[actix_web::test]
    async fn test_unreachable_service_is_upstream_failure() {
        let client = ScoringClient::new("http://127.0.0.1:9/predict/");
        let request = ScoringRequest {
            founder: FounderFeatures {
                fund_required: 1.0,
                industry: "Other".to_string(),
                funding_stage: "Seed".to_string(),
            },
            investor: InvestorFeatures {
                total_invested: 1.0,
                preferred_funding_stage: "Seed".to_string(),
                risk_tolerance: "Moderate".to_string(),
            },
        };

        let result = client.predict(&request).await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }
}
