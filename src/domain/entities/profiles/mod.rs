pub mod founder;
pub mod investor;

pub use founder::Founder;
pub use investor::{Investor, PortfolioEntry};
