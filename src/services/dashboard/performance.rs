//! # 포트폴리오 성과 시계열과 지표
//!
//! ## 기간
//!
//! `1m`, `3m`, `6m`, `1y`, `3y`, `5y`. 그 밖의 값은 `1y`로 취급합니다.
//!
//! ## 지표
//!
//! | 지표 | 조건 | 계산 |
//! |------|------|------|
//! | totalReturn | 2개 이상 | `(last − first) / first × 100` |
//! | annualizedReturn | 2개 이상, 경과 연수 > 0 | `((1 + tr/100)^(1/years) − 1) × 100` |
//! | volatility | 3개 이상 | 구간 수익률의 모표준편차 × 100 |
//!
//! 경과 연수는 첫 점과 마지막 점의 밀리초 차이를 365일로 나눈 값입니다.
//!
//! ## 임시 시계열
//!
//! 평가 이력이 없으면 기간 시작부터 한 달 간격으로 100000에서 출발해
//! 매달 `1 + (u × 0.05 − 0.01)`배(`u ∈ [0, 1)`) 변하는 값을 만듭니다.
//! 난수 생성기는 호출자가 넣어 주므로 시드를 고정하면 결과가 재현됩니다.

use chrono::{DateTime, Months, Utc};
use rand::Rng;

use crate::domain::dto::dashboard::{PerformanceMetrics, PerformancePoint};

pub const SYNTHETIC_BASELINE: f64 = 100_000.0;

const MILLIS_PER_YEAR: f64 = 1000.0 * 3600.0 * 24.0 * 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformancePeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    ThreeYears,
    FiveYears,
}

impl PerformancePeriod {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("1m") => PerformancePeriod::OneMonth,
            Some("3m") => PerformancePeriod::ThreeMonths,
            Some("6m") => PerformancePeriod::SixMonths,
            Some("3y") => PerformancePeriod::ThreeYears,
            Some("5y") => PerformancePeriod::FiveYears,
            _ => PerformancePeriod::OneYear,
        }
    }

    pub fn months(&self) -> u32 {
        match self {
            PerformancePeriod::OneMonth => 1,
            PerformancePeriod::ThreeMonths => 3,
            PerformancePeriod::SixMonths => 6,
            PerformancePeriod::OneYear => 12,
            PerformancePeriod::ThreeYears => 36,
            PerformancePeriod::FiveYears => 60,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformancePeriod::OneMonth => "1m",
            PerformancePeriod::ThreeMonths => "3m",
            PerformancePeriod::SixMonths => "6m",
            PerformancePeriod::OneYear => "1y",
            PerformancePeriod::ThreeYears => "3y",
            PerformancePeriod::FiveYears => "5y",
        }
    }

    /// `end`에서 기간만큼 거슬러 올라간 시작 시각
    pub fn start_before(&self, end: DateTime<Utc>) -> DateTime<Utc> {
        end.checked_sub_months(Months::new(self.months())).unwrap_or(end)
    }
}

/// `[start, end)` 구간의 월별 임시 시계열
pub fn synthesize_series<R: Rng>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rng: &mut R,
) -> Vec<PerformancePoint> {
    let mut points = Vec::new();
    let mut date = start;
    let mut value = SYNTHETIC_BASELINE;

    while date < end {
        points.push(PerformancePoint { date, value });

        value *= 1.0 + (rng.random::<f64>() * 0.05 - 0.01);
        date = match date.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    points
}

pub fn compute_metrics(points: &[PerformancePoint]) -> PerformanceMetrics {
    let mut metrics = PerformanceMetrics::default();

    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => (first, last),
        _ => return metrics,
    };

    if first.value == 0.0 {
        return metrics;
    }

    metrics.total_return = (last.value - first.value) / first.value * 100.0;

    let years = (last.date - first.date).num_milliseconds() as f64 / MILLIS_PER_YEAR;
    if years > 0.0 {
        metrics.annualized_return = ((1.0 + metrics.total_return / 100.0).powf(1.0 / years) - 1.0) * 100.0;
    }

    if points.len() >= 3 {
        let returns: Vec<f64> = points
            .windows(2)
            .map(|pair| {
                if pair[0].value == 0.0 {
                    0.0
                } else {
                    (pair[1].value - pair[0].value) / pair[0].value
                }
            })
            .collect();

        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
        metrics.volatility = variance.sqrt() * 100.0;
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::{rngs::StdRng, SeedableRng};

    fn point(date: DateTime<Utc>, value: f64) -> PerformancePoint {
        PerformancePoint { date, value }
    }

    #[test]
    fn test_period_parse_defaults_to_one_year() {
        assert_eq!(PerformancePeriod::parse(Some("3m")), PerformancePeriod::ThreeMonths);
        assert_eq!(PerformancePeriod::parse(Some("5y")), PerformancePeriod::FiveYears);
        assert_eq!(PerformancePeriod::parse(Some("2w")), PerformancePeriod::OneYear);
        assert_eq!(PerformancePeriod::parse(None), PerformancePeriod::OneYear);
        assert_eq!(PerformancePeriod::parse(Some("6m")).months(), 6);
    }

    #[test]
    fn test_start_before() {
        let end = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        assert_eq!(
            PerformancePeriod::ThreeMonths.start_before(end),
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_single_year_two_points() {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let points = vec![point(start, 100000.0), point(start + Duration::days(365), 110000.0)];

        let metrics = compute_metrics(&points);
        assert!((metrics.total_return - 10.0).abs() < 1e-9);
        assert!((metrics.annualized_return - 10.0).abs() < 1e-9);
        assert_eq!(metrics.volatility, 0.0);
    }

    #[test]
    fn test_fewer_than_two_points_is_zero() {
        let now = Utc::now();
        assert_eq!(compute_metrics(&[]), PerformanceMetrics::default());
        assert_eq!(compute_metrics(&[point(now, 5.0)]), PerformanceMetrics::default());
    }

    #[test]
    fn test_zero_initial_value_is_zero() {
        let now = Utc::now();
        let points = vec![point(now, 0.0), point(now + Duration::days(30), 10.0)];
        assert_eq!(compute_metrics(&points), PerformanceMetrics::default());
    }

    #[test]
    fn test_volatility_is_population_std_dev() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let points = vec![
            point(start, 100.0),
            point(start + Duration::days(30), 110.0),
            point(start + Duration::days(60), 99.0),
        ];

        // 구간 수익률 +10%, -10% → 평균 0, 모표준편차 0.1
        let metrics = compute_metrics(&points);
        assert!((metrics.volatility - 10.0).abs() < 1e-9);
        assert!((metrics.total_return - (-1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_synthetic_series_shape() {
        let end = Utc.with_ymd_and_hms(2024, 12, 10, 0, 0, 0).unwrap();
        let start = PerformancePeriod::OneYear.start_before(end);
        let mut rng = StdRng::seed_from_u64(7);

        let points = synthesize_series(start, end, &mut rng);

        assert_eq!(points.len(), 12);
        assert_eq!(points[0].date, start);
        assert_eq!(points[0].value, SYNTHETIC_BASELINE);
        assert!(points.iter().all(|p| p.date < end));
        for pair in points.windows(2) {
            let ratio = pair[1].value / pair[0].value;
            assert!((0.989..1.041).contains(&ratio));
        }
    }

    #[test]
    fn test_synthetic_series_is_reproducible_with_seed() {
        let end = Utc::now();
        let start = PerformancePeriod::SixMonths.start_before(end);

        let first = synthesize_series(start, end, &mut StdRng::seed_from_u64(42));
        let second = synthesize_series(start, end, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
