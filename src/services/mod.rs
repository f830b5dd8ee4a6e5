//! # Services
//!
//! `#[service]` 매크로로 선언되는 비즈니스 계층입니다. 리포지토리와 외부 클라이언트는
//! `Arc` 필드로 자동 주입됩니다.
//!
//! | 서비스 | 담당 |
//! |--------|------|
//! | `TokenService` | JWT 발급/검증 |
//! | `SessionService` | 로그아웃 시 토큰 폐기 |
//! | `UserService` | 가입, 로그인, 역할 부여 |
//! | `ProfileService` | 창업자/투자자 프로필 |
//! | `MatchingService` | 후보 선별, 점수 산출, 매칭 저장 |
//! | `DealFlowService` | 딜과 하위 항목 관리 |
//! | `InvestmentService` | 트랜잭션 기반 투자 실행 |
//! | `InvestorDashboardService` / `FounderDashboardService` | 집계 |
//! | `NotificationService` | 알림 |
//! | `GrantService` | 지원금 공고와 신청 |
//!
//! ```rust,ignore
//! use crate::services::deals::DealFlowService;
//!
//! let service = DealFlowService::instance();
//! let deals = service.list(&investor_id).await?;
//! ```

pub mod auth;
pub mod users;
pub mod profiles;
pub mod matching;
pub mod deals;
pub mod dashboard;
pub mod notifications;
pub mod grants;
