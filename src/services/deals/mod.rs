//! 딜 파이프라인 조작과 투자 실행

pub mod overview;
pub mod dealflow_service;
pub mod investment_service;

pub use dealflow_service::DealFlowService;
pub use investment_service::InvestmentService;
