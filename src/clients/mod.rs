//! 외부 협력 서비스 클라이언트
//!
//! 매크로 레지스트리 대상이 아니므로 `main`에서 직접 생성해
//! `ServiceLocator::set`으로 등록합니다.

pub mod calendar_client;
pub mod scoring_client;

pub use calendar_client::{CalendarClient, CalendarEvent, MeetingScheduler};
pub use scoring_client::{FounderFeatures, InvestorFeatures, MatchScorer, ScoringClient, ScoringRequest};
