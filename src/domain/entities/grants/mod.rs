pub mod grant;
pub mod grant_application;

pub use grant::Grant;
pub use grant_application::{ApplicationStatus, GrantApplication};
