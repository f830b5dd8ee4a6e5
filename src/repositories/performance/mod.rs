pub mod valuation_repo;

pub use valuation_repo::ValuationRepository;
