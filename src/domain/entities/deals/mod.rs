pub mod deal;
pub mod deal_items;
pub mod deal_state;
pub mod investment;

pub use deal::Deal;
pub use deal_items::{DealDocument, Meeting, MeetingStatus, Note, Task, TaskPriority};
pub use deal_state::{DealStage, DealStatus};
pub use investment::Investment;
