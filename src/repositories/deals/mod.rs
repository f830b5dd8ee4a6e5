//! 딜 파이프라인과 투자 원장 리포지토리

pub mod deal_repo;
pub mod investment_repo;

pub use deal_repo::{DealRepository, EnrichedDeal};
pub use investment_repo::InvestmentRepository;
