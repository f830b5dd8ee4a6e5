//! # 포트폴리오/파이프라인/모금 집계 계산
//!
//! 저장소 접근 없이 이미 읽어 온 문서만으로 대시보드 수치를 계산하는 순수 함수 모음입니다.
//!
//! ## 포트폴리오 요약
//!
//! ```text
//! currentValue = 저장된 current_value
//!              ?? invested × (1 + growthRate / 100)      (창업자가 없으면 growthRate = 0)
//! ROI          = (currentValue − invested) / invested × 100   (invested ≤ 0 이면 0)
//! topPerformers = ROI 내림차순 상위 3개 (동률은 포트폴리오 순서 유지)
//! ```

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use mongodb::bson::oid::ObjectId;

use crate::domain::{
    dto::dashboard::{FundraisingSummary, PortfolioSummary, TopPerformer},
    entities::{deals::Investment, profiles::{Founder, PortfolioEntry}},
};

pub const TOP_PERFORMER_COUNT: usize = 3;

pub fn roi(invested: f64, current_value: f64) -> f64 {
    if invested <= 0.0 {
        return 0.0;
    }
    (current_value - invested) / invested * 100.0
}

/// 성장률(%)을 반영한 추정 가치
pub fn projected_value(invested: f64, growth_rate: f64) -> f64 {
    invested * (1.0 + growth_rate / 100.0)
}

fn growth_of(founder: Option<&Founder>) -> f64 {
    founder.and_then(|f| f.growth_rate).unwrap_or(0.0)
}

/// 포트폴리오 요약
///
/// `founders`는 창업자 사용자 ID로 색인된 프로필입니다. 프로필이 없는 항목도 집계에 포함됩니다.
pub fn summarize_portfolio(
    entries: &[PortfolioEntry],
    founders: &HashMap<ObjectId, Founder>,
) -> PortfolioSummary {
    if entries.is_empty() {
        return PortfolioSummary::default();
    }

    let mut holdings: Vec<TopPerformer> = entries
        .iter()
        .map(|entry| {
            let founder = founders.get(&entry.startup_id);
            let current_value = entry
                .current_value
                .unwrap_or_else(|| projected_value(entry.amount, growth_of(founder)));

            TopPerformer {
                startup_id: entry.startup_id.to_hex(),
                startup_name: founder
                    .map(|f| f.startup_name.clone())
                    .filter(|name| !name.is_empty()),
                industry: founder.and_then(|f| f.industry.clone()),
                invested: entry.amount,
                current_value,
                roi: roi(entry.amount, current_value),
            }
        })
        .collect();

    let total_invested: f64 = holdings.iter().map(|h| h.invested).sum();
    let total_current_value: f64 = holdings.iter().map(|h| h.current_value).sum();
    let total_startups = holdings.len();

    holdings.sort_by(|a, b| b.roi.partial_cmp(&a.roi).unwrap_or(Ordering::Equal));
    holdings.truncate(TOP_PERFORMER_COUNT);

    PortfolioSummary {
        total_invested,
        total_current_value,
        total_startups,
        average_investment: total_invested / total_startups as f64,
        top_performers: holdings,
    }
}

/// 현재 가치가 비어 있는 항목의 `(index, 추정 가치)` 목록
pub fn missing_valuations(
    entries: &[PortfolioEntry],
    founders: &HashMap<ObjectId, Founder>,
) -> Vec<(usize, f64)> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.current_value.is_none())
        .map(|(index, entry)| {
            let value = projected_value(entry.amount, growth_of(founders.get(&entry.startup_id)));
            (index, value)
        })
        .collect()
}

/// 창업자 모금 현황
pub fn summarize_fundraising(fund_required: Option<f64>, investments: &[Investment]) -> FundraisingSummary {
    let total_raised: f64 = investments.iter().map(|i| i.amount).sum();

    let funding_goal = match fund_required {
        Some(goal) if goal > 0.0 => goal,
        _ => 1.0,
    };

    let number_of_investors = investments
        .iter()
        .map(|i| i.investor_id)
        .collect::<HashSet<_>>()
        .len();

    let average_investment = if investments.is_empty() {
        0.0
    } else {
        total_raised / investments.len() as f64
    };

    FundraisingSummary {
        total_raised,
        funding_goal,
        percentage_complete: (total_raised * 100.0 / funding_goal).floor() as i64,
        number_of_investors,
        average_investment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(startup_id: ObjectId, amount: f64, current_value: Option<f64>) -> PortfolioEntry {
        PortfolioEntry {
            startup_id,
            amount,
            current_value,
            deal_id: None,
            invested_at: None,
        }
    }

    fn founder(user_id: ObjectId, name: &str, growth_rate: Option<f64>) -> Founder {
        let mut founder = Founder::new_empty(user_id);
        founder.startup_name = name.to_string();
        founder.industry = Some("Fintech".to_string());
        founder.growth_rate = growth_rate;
        founder
    }

    #[test]
    fn test_roi_zero_investment() {
        assert_eq!(roi(0.0, 5000.0), 0.0);
        assert_eq!(roi(-10.0, 5000.0), 0.0);
        assert_eq!(roi(1000.0, 1500.0), 50.0);
    }

    #[test]
    fn test_empty_portfolio_is_zeroed() {
        let summary = summarize_portfolio(&[], &HashMap::new());
        assert_eq!(summary.total_startups, 0);
        assert_eq!(summary.average_investment, 0.0);
        assert!(summary.top_performers.is_empty());
    }

    #[test]
    fn test_summary_counts_and_average() {
        let ids: Vec<ObjectId> = (0..4).map(|_| ObjectId::new()).collect();
        let entries = vec![
            entry(ids[0], 10000.0, Some(12000.0)),
            entry(ids[1], 20000.0, None),
            entry(ids[2], 30000.0, Some(15000.0)),
            entry(ids[3], 40000.0, None),
        ];
        let founders = HashMap::from([
            (ids[1], founder(ids[1], "Beta", Some(50.0))),
            (ids[3], founder(ids[3], "Delta", None)),
        ]);

        let summary = summarize_portfolio(&entries, &founders);

        assert_eq!(summary.total_startups, 4);
        assert_eq!(summary.total_invested, 100000.0);
        assert_eq!(summary.average_investment, 25000.0);
        assert_eq!(summary.total_current_value, 12000.0 + 30000.0 + 15000.0 + 40000.0);

        let top: Vec<f64> = summary.top_performers.iter().map(|t| t.roi).collect();
        assert_eq!(top, vec![50.0, 20.0, 0.0]);
        assert_eq!(summary.top_performers[0].startup_name.as_deref(), Some("Beta"));
    }

    #[test]
    fn test_top_performers_ties_keep_portfolio_order() {
        let ids: Vec<ObjectId> = (0..5).map(|_| ObjectId::new()).collect();
        let entries: Vec<_> = ids.iter().map(|id| entry(*id, 1000.0, Some(1100.0))).collect();

        let summary = summarize_portfolio(&entries, &HashMap::new());

        assert_eq!(summary.top_performers.len(), 3);
        let order: Vec<String> = summary.top_performers.iter().map(|t| t.startup_id.clone()).collect();
        assert_eq!(order, vec![ids[0].to_hex(), ids[1].to_hex(), ids[2].to_hex()]);
    }

    #[test]
    fn test_missing_founder_counts_with_null_enrichment() {
        let id = ObjectId::new();
        let summary = summarize_portfolio(&[entry(id, 5000.0, None)], &HashMap::new());

        assert_eq!(summary.total_startups, 1);
        let only = &summary.top_performers[0];
        assert_eq!(only.current_value, 5000.0);
        assert_eq!(only.roi, 0.0);
        assert!(only.startup_name.is_none() && only.industry.is_none());
    }

    #[test]
    fn test_missing_valuations_skips_valued_entries() {
        let ids: Vec<ObjectId> = (0..3).map(|_| ObjectId::new()).collect();
        let entries = vec![
            entry(ids[0], 1000.0, Some(900.0)),
            entry(ids[1], 2000.0, None),
            entry(ids[2], 3000.0, None),
        ];
        let founders = HashMap::from([(ids[1], founder(ids[1], "B", Some(10.0)))]);

        let pending = missing_valuations(&entries, &founders);
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].0, 1);
        assert!((pending[0].1 - 2200.0).abs() < 1e-9);
        assert_eq!(pending[1], (2, 3000.0));
    }

    #[test]
    fn test_fundraising_summary() {
        let founder_id = ObjectId::new();
        let repeat_investor = ObjectId::new();
        let investments = vec![
            Investment::new(ObjectId::new(), repeat_investor, founder_id, 100000.0),
            Investment::new(ObjectId::new(), repeat_investor, founder_id, 50000.0),
            Investment::new(ObjectId::new(), ObjectId::new(), founder_id, 30000.0),
        ];

        let summary = summarize_fundraising(Some(500000.0), &investments);
        assert_eq!(summary.total_raised, 180000.0);
        assert_eq!(summary.percentage_complete, 36);
        assert_eq!(summary.number_of_investors, 2);
        assert_eq!(summary.average_investment, 60000.0);
    }

    #[test]
    fn test_fundraising_without_goal() {
        let summary = summarize_fundraising(None, &[]);
        assert_eq!(summary.funding_goal, 1.0);
        assert_eq!(summary.percentage_complete, 0);
        assert_eq!(summary.average_investment, 0.0);
    }
}
