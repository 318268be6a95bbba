//! Notion side of the relay: the database query client, the typed property
//! model and the total extractors that flatten rows into [`ApprovalRecord`]s.
//!
//! [`ApprovalRecord`]: relay_common::ApprovalRecord

pub mod client;
pub mod extract;
pub mod property;
pub mod record;

pub use client::{NotionClient, RecordSource};
pub use property::{Page, Property, QueryResponse};
