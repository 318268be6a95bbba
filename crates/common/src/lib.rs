pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DeliveryPolicy};
pub use error::RelayError;
pub use types::ApprovalRecord;
