//! # Domain Layer
//!
//! 딜 플로우 도메인의 데이터 구조를 모아 둔 계층입니다.
//!
//! ```text
//! domain/
//! ├── entities/   MongoDB 문서 (User, Founder, Investor, Deal, Match, Grant ...)
//! ├── dto/        HTTP 요청/응답 계약 (validator 검증, camelCase 대시보드)
//! └── models/     인증 컨텍스트와 JWT 클레임
//! ```
//!
//! 엔티티는 `bson::DateTime`과 `ObjectId`를 그대로 저장하고, 응답 DTO로 변환될 때
//! 16진수 문자열과 `chrono::DateTime<Utc>`로 바뀝니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::deals::Deal;
//! use crate::domain::dto::deals::DealResponse;
//!
//! let deal = Deal::new(investor_id, startup_id, 82.5, 500_000.0);
//! let response = DealResponse::from(deal);
//! ```

pub mod entities;
pub mod dto;
pub mod models;
