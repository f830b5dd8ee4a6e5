//! # Configuration
//!
//! 환경 변수 기반 설정입니다. 모든 값은 호출 시점에 읽으며 기본값을 가집니다.
//! `.env.dev` / `.env.prod` 파일은 `main`에서 `PROFILE`에 따라 로드됩니다.
//!
//! - [`data_config`]: 실행 환경, 서버, 비밀번호 해싱
//! - [`auth_config`]: JWT 발급/검증
//! - [`integration_config`]: 외부 스코어링 서비스, 캘린더, 성과 시계열
//!
//! ```rust,ignore
//! use crate::config::{ScoringConfig, ServerConfig};
//!
//! let bind = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
//! let endpoint = ScoringConfig::endpoint();
//! ```

pub mod data_config;
pub mod auth_config;
pub mod integration_config;

pub use data_config::*;
pub use auth_config::*;
pub use integration_config::*;
