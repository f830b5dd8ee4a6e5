//! # 매칭 규칙과 점수 정규화
//!
//! ## 후보 조건
//!
//! 창업자의 산업이 투자자의 선호 산업 목록에 있고, 창업자의 투자 단계가
//! 투자자의 선호 투자 단계와 정확히 같아야 합니다. 어느 한쪽 값이라도 없으면 후보가 아닙니다.
//!
//! ## 스코어링 요청 기본값
//!
//! | 필드 | 기본값 |
//! |------|--------|
//! | fund_required | 500000 |
//! | industry | `Other` |
//! | funding_stage | `Seed` |
//! | total_invested | 1000000 |
//! | preferred_funding_stage | `Seed` |
//! | risk_tolerance | `Moderate` |
//!
//! ## 정규화
//!
//! 1 이하의 값은 확률로 보고 100을 곱합니다. 결과는 `[0, 100]`으로 자르고 소수점 둘째 자리에서 반올림합니다.

use crate::clients::{FounderFeatures, InvestorFeatures, MatchScorer, ScoringRequest};
use crate::core::errors::AppError;
use crate::domain::entities::profiles::{Founder, Investor};

pub const DEFAULT_FUND_REQUIRED: f64 = 500_000.0;
pub const DEFAULT_INDUSTRY: &str = "Other";
pub const DEFAULT_FUNDING_STAGE: &str = "Seed";
pub const DEFAULT_TOTAL_INVESTED: f64 = 1_000_000.0;
pub const DEFAULT_RISK_TOLERANCE: &str = "Moderate";

pub fn is_eligible(founder: &Founder, investor: &Investor) -> bool {
    let industry_match = founder
        .industry
        .as_ref()
        .is_some_and(|industry| investor.preferred_industries.iter().any(|p| p == industry));

    let stage_match = matches!(
        (&founder.funding_stage, &investor.preferred_funding_stage),
        (Some(founder_stage), Some(investor_stage)) if founder_stage == investor_stage
    );

    industry_match && stage_match
}

fn text_or(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// 누락 값을 기본값으로 채운 스코어링 요청
pub fn build_request(founder: &Founder, investor: &Investor) -> ScoringRequest {
    let fund_required = founder
        .fund_required
        .filter(|amount| *amount > 0.0)
        .unwrap_or(DEFAULT_FUND_REQUIRED);

    let total_invested = if investor.total_invested > 0.0 {
        investor.total_invested
    } else {
        DEFAULT_TOTAL_INVESTED
    };

    ScoringRequest {
        founder: FounderFeatures {
            fund_required,
            industry: text_or(&founder.industry, DEFAULT_INDUSTRY),
            funding_stage: text_or(&founder.funding_stage, DEFAULT_FUNDING_STAGE),
        },
        investor: InvestorFeatures {
            total_invested,
            preferred_funding_stage: text_or(&investor.preferred_funding_stage, DEFAULT_FUNDING_STAGE),
            risk_tolerance: text_or(&investor.risk_tolerance, DEFAULT_RISK_TOLERANCE),
        },
    }
}

pub fn normalize_score(raw: f64) -> f64 {
    let percentage = if raw <= 1.0 { raw * 100.0 } else { raw };
    (percentage.clamp(0.0, 100.0) * 100.0).round() / 100.0
}

/// 후보 조건 확인 후 점수를 받아 백분율로 변환
pub async fn score_pair(scorer: &dyn MatchScorer, founder: &Founder, investor: &Investor) -> Result<f64, AppError> {
    if !is_eligible(founder, investor) {
        return Err(AppError::ValidationError(
            "산업 또는 투자 단계가 투자자 선호와 맞지 않습니다".to_string(),
        ));
    }

    let raw = scorer.predict(&build_request(founder, investor)).await?;
    Ok(normalize_score(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;
    use std::sync::Mutex;

    struct FixedScorer {
        value: f64,
        seen: Mutex<Vec<ScoringRequest>>,
    }

    #[async_trait]
    impl MatchScorer for FixedScorer {
        async fn predict(&self, request: &ScoringRequest) -> Result<f64, AppError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.value)
        }
    }

    fn fintech_seed_founder() -> Founder {
        let mut founder = Founder::new_empty(ObjectId::new());
        founder.industry = Some("Fintech".to_string());
        founder.funding_stage = Some("Seed".to_string());
        founder
    }

    fn investor(industries: &[&str], stage: Option<&str>) -> Investor {
        let mut investor = Investor::new_empty(ObjectId::new());
        investor.preferred_industries = industries.iter().map(|s| s.to_string()).collect();
        investor.preferred_funding_stage = stage.map(str::to_string);
        investor
    }

    #[test]
    fn test_eligibility_rule() {
        let mut founder = fintech_seed_founder();
        let investor = investor(&["Fintech", "Health"], Some("Seed"));
        assert!(is_eligible(&founder, &investor));

        founder.funding_stage = Some("Series A".to_string());
        assert!(!is_eligible(&founder, &investor));
    }

    #[test]
    fn test_eligibility_requires_both_sides() {
        let founder = fintech_seed_founder();
        assert!(!is_eligible(&founder, &investor(&["Health"], Some("Seed"))));
        assert!(!is_eligible(&founder, &investor(&["Fintech"], None)));

        let mut no_industry = fintech_seed_founder();
        no_industry.industry = None;
        assert!(!is_eligible(&no_industry, &investor(&["Fintech"], Some("Seed"))));
    }

    #[test]
    fn test_build_request_applies_defaults() {
        let founder = Founder::new_empty(ObjectId::new());
        let investor = Investor::new_empty(ObjectId::new());

        let request = build_request(&founder, &investor);
        assert_eq!(request.founder.fund_required, DEFAULT_FUND_REQUIRED);
        assert_eq!(request.founder.industry, "Other");
        assert_eq!(request.founder.funding_stage, "Seed");
        assert_eq!(request.investor.total_invested, DEFAULT_TOTAL_INVESTED);
        assert_eq!(request.investor.preferred_funding_stage, "Seed");
        assert_eq!(request.investor.risk_tolerance, "Moderate");
    }

    #[test]
    fn test_build_request_keeps_present_values() {
        let mut founder = fintech_seed_founder();
        founder.fund_required = Some(750000.0);
        let mut investor = investor(&["Fintech"], Some("Seed"));
        investor.total_invested = 2500000.0;
        investor.risk_tolerance = Some("High".to_string());

        let request = build_request(&founder, &investor);
        assert_eq!(request.founder.fund_required, 750000.0);
        assert_eq!(request.founder.industry, "Fintech");
        assert_eq!(request.investor.total_invested, 2500000.0);
        assert_eq!(request.investor.risk_tolerance, "High");
    }

    #[test]
    fn test_normalize_score() {
        assert_eq!(normalize_score(0.87314), 87.31);
        assert_eq!(normalize_score(1.0), 100.0);
        assert_eq!(normalize_score(64.456), 64.46);
        assert_eq!(normalize_score(130.0), 100.0);
        assert_eq!(normalize_score(-0.2), 0.0);
    }

    #[actix_web::test]
    async fn test_score_pair_rejects_ineligible_without_calling_scorer() {
        let scorer = FixedScorer { value: 0.9, seen: Mutex::new(Vec::new()) };
        let founder = fintech_seed_founder();

        let result = score_pair(&scorer, &founder, &investor(&["Health"], Some("Seed"))).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(scorer.seen.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_score_pair_normalizes_probability() {
        let scorer = FixedScorer { value: 0.8125, seen: Mutex::new(Vec::new()) };
        let founder = fintech_seed_founder();

        let score = score_pair(&scorer, &founder, &investor(&["Fintech"], Some("Seed"))).await.unwrap();
        assert_eq!(score, 81.25);
        assert_eq!(scorer.seen.lock().unwrap()[0].founder.industry, "Fintech");
    }
}
