pub mod activity;
pub mod match_record;

pub use activity::{Activity, ActivityType};
pub use match_record::Match;
