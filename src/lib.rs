//! 딜플로우 백엔드
//!
//! 창업자와 투자자를 연결하는 딜플로우/매칭 플랫폼의 REST API 서버입니다.
//! 투자자는 매칭 점수로 스타트업을 발굴하고, 딜 파이프라인에서 미팅/문서/태스크를 관리하며,
//! 투자를 실행하고 포트폴리오 성과를 추적합니다. 창업자는 대시보드와 지원금 공고를 사용합니다.
//!
//! # Features
//!
//! - **계정/인증**: 로컬 계정, bcrypt 비밀번호, JWT 액세스 토큰, 역할 기반 접근 제어
//! - **프로필**: 창업자/투자자 프로필과 스타트업 목록
//! - **매칭**: 외부 스코어링 서비스 호출 후 0~100 점수 저장
//! - **딜플로우**: 단계/상태 변경, 미팅 예약, 문서, 태스크, 메모, 트랜잭션 투자 실행
//! - **대시보드**: 투자자 포트폴리오/성과, 창업자 현황
//! - **알림/지원금**: 알림함, 지원금 공고와 신청 심사
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/v1/* 스코프 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 검증, 역할 확인, 응답 코드
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 규칙, 트랜잭션 ──→ clients (스코어링, 캘린더)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 컬렉션별 데이터 액세스, 프로필 캐시
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │
//! └─────────────────┘
//! ```
//!
//! ```rust,ignore
//! use dealflow_backend::services::deals::DealFlowService;
//!
//! let deal = DealFlowService::instance()
//!     .add(&investor_id, &request)
//!     .await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod clients;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
