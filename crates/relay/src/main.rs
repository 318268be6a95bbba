use chrono::Local;
use tracing_subscriber::EnvFilter;

use approval_relay::ApprovalRelay;
use relay_common::config::AppConfig;
use relay_notifier::TelegramNotifier;
use relay_notion::NotionClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("approval_relay=debug,relay_notion=debug,relay_notifier=debug,relay_common=info")
        }))
        .json()
        .init();

    tracing::info!(
        started_at = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        "Approval relay starting..."
    );

    // Load configuration
    let config = AppConfig::from_env()?;

    let relay = ApprovalRelay::new(
        NotionClient::new(&config),
        TelegramNotifier::new(&config),
        &config,
    );

    // One pass, then exit; scheduling is left to cron / systemd timers
    match relay.run_once().await {
        Ok(summary) => {
            tracing::info!(
                fetched = summary.fetched,
                sent = summary.sent,
                failed = summary.failed,
                already_sent = summary.already_sent,
                incomplete = summary.incomplete,
                missing_id = summary.missing_id,
                delivery_policy = %config.delivery_policy,
                "Approval relay run finished"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                sent_ids_file = %config.sent_ids_path.display(),
                "Approval relay run aborted"
            );
            Err(e.into())
        }
    }
}
