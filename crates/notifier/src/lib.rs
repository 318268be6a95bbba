//! Delivery of approval notices.
//!
//! - [`message`] renders an [`ApprovalRecord`] into the Markdown notice.
//! - [`telegram`] posts the notice through the Telegram Bot API.
//!
//! [`ApprovalRecord`]: relay_common::ApprovalRecord

pub mod message;
pub mod telegram;

use async_trait::async_trait;

use relay_common::error::RelayError;

pub use message::format_approval_message;
pub use telegram::TelegramNotifier;

/// A channel that can deliver a text message to a recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to `recipient`. `Ok` means the channel confirmed delivery.
    async fn send(&self, recipient: &str, text: &str) -> Result<(), RelayError>;

    /// Channel name for logging.
    fn name(&self) -> &'static str;
}
