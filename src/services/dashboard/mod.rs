//! # 대시보드 집계
//!
//! - [`calculations`]: 포트폴리오 요약, ROI, 모금 현황 (순수 함수)
//! - [`performance`]: 성과 기간, 임시 시계열, 수익률/변동성 지표 (순수 함수)
//! - [`InvestorDashboardService`]: 투자자 대시보드, 성과, 평가 갱신
//! - [`FounderDashboardService`]: 창업자 모금 현황과 투자자 관심도

pub mod calculations;
pub mod performance;
pub mod investor_dashboard_service;
pub mod founder_dashboard_service;

pub use founder_dashboard_service::FounderDashboardService;
pub use investor_dashboard_service::InvestorDashboardService;
