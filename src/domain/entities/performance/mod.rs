pub mod valuation;

pub use valuation::PortfolioValuation;
