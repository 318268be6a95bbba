pub mod dedup;
pub mod relay;

pub use dedup::SentIdStore;
pub use relay::{ApprovalRelay, RunSummary};
