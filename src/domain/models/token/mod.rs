pub mod token;

pub use token::{AccessToken, TokenClaims};
