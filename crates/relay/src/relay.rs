//! One relay run: fetch approval rows, deliver the new complete ones, record
//! what was delivered.
//!
//! The run is strictly sequential. The dedup file is rewritten after every
//! recorded send, so a crash loses at most the send in flight.

use std::path::PathBuf;

use serde::Serialize;

use relay_common::config::{AppConfig, DeliveryPolicy};
use relay_common::error::RelayError;
use relay_common::types::ApprovalRecord;
use relay_notifier::{Notifier, format_approval_message};
use relay_notion::RecordSource;

use crate::dedup::SentIdStore;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub fetched: usize,
    pub already_sent: usize,
    pub incomplete: usize,
    pub missing_id: usize,
    pub sent: usize,
    pub failed: usize,
}

pub struct ApprovalRelay<S, N> {
    source: S,
    notifier: N,
    sent_ids_path: PathBuf,
    policy: DeliveryPolicy,
}

impl<S, N> ApprovalRelay<S, N>
where
    S: RecordSource,
    N: Notifier,
{
    pub fn new(source: S, notifier: N, config: &AppConfig) -> Self {
        Self {
            source,
            notifier,
            sent_ids_path: config.sent_ids_path.clone(),
            policy: config.delivery_policy,
        }
    }

    /// Execute a single run.
    ///
    /// A failed fetch or an empty result is a no-op. A failed send is logged
    /// and the run moves on; whether its identifier is still recorded depends
    /// on the [`DeliveryPolicy`]. Only dedup-file errors abort the run.
    pub async fn run_once(&self) -> Result<RunSummary, RelayError> {
        let mut summary = RunSummary::default();

        let Some(pages) = self.source.fetch_records().await else {
            return Ok(summary);
        };

        if pages.is_empty() {
            tracing::info!("No data found.");
            return Ok(summary);
        }
        summary.fetched = pages.len();

        let mut sent_ids = SentIdStore::load(&self.sent_ids_path)?;

        for page in &pages {
            let record = ApprovalRecord::from(page);

            let Some(id) = record.id.as_deref() else {
                tracing::warn!("Skipping record without an id");
                summary.missing_id += 1;
                continue;
            };

            tracing::debug!(
                record_id = id,
                recipient_id = %record.recipient_id,
                delivery_flag = %record.delivery_flag,
                activity_id = %record.activity_id,
                "Extracted record"
            );

            if sent_ids.contains(id) {
                summary.already_sent += 1;
                continue;
            }

            if !record.is_complete() {
                summary.incomplete += 1;
                continue;
            }

            let message = format_approval_message(&record);
            tracing::debug!(record_id = id, message = %message, "Sending message");

            let delivered = match self.notifier.send(&record.recipient_id, &message).await {
                Ok(()) => {
                    summary.sent += 1;
                    true
                }
                Err(e) => {
                    tracing::error!(
                        record_id = id,
                        recipient_id = %record.recipient_id,
                        channel = self.notifier.name(),
                        error = %e,
                        "Error sending message"
                    );
                    summary.failed += 1;
                    false
                }
            };

            if delivered || self.policy == DeliveryPolicy::AtMostOnce {
                sent_ids.insert(id);
                sent_ids.save()?;
            }
        }

        Ok(summary)
    }
}
