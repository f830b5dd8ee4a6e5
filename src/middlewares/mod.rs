//! 미들웨어 모듈
//!
//! 현재는 Bearer 토큰 인증 미들웨어 하나입니다. 스코프마다 요구 역할을 달리해 감쌉니다.
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! web::scope("/api/v1/dealflow")
//!     .wrap(AuthMiddleware::required_with_role("investor"))
//!     .service(/* 핸들러 */);
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
