//! 대시보드/집계 응답 DTO (camelCase)

pub mod founder;
pub mod investor;

pub use founder::*;
pub use investor::*;
