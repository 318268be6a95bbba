use async_trait::async_trait;

use relay_common::config::AppConfig;
use relay_common::error::RelayError;

use crate::property::{Page, QueryResponse};

/// A source of approval rows for one relay run.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the current rows. `None` means the fetch failed and the run
    /// should do nothing.
    async fn fetch_records(&self) -> Option<Vec<Page>>;
}

/// Client for the Notion database query endpoint.
pub struct NotionClient {
    client: reqwest::Client,
    query_url: String,
    api_key: String,
    notion_version: String,
}

impl NotionClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &AppConfig) -> Self {
        Self {
            client,
            query_url: format!(
                "{}/v1/databases/{}/query",
                config.notion_api_url.trim_end_matches('/'),
                config.notion_database_id
            ),
            api_key: config.notion_api_key.clone(),
            notion_version: config.notion_version.clone(),
        }
    }

    /// Build the query request without sending it.
    pub fn query_request(&self) -> Result<reqwest::Request, RelayError> {
        let request = self
            .client
            .post(&self.query_url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", &self.notion_version)
            .json(&serde_json::json!({}))
            .build()?;
        Ok(request)
    }

    /// Run a single (first page only) query against the configured database.
    pub async fn query_database(&self) -> Result<QueryResponse, RelayError> {
        let request = self.query_request()?;
        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            return Err(RelayError::from_response("notion", response).await);
        }

        let body: QueryResponse = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl RecordSource for NotionClient {
    async fn fetch_records(&self) -> Option<Vec<Page>> {
        match self.query_database().await {
            Ok(response) => {
                if response.has_more {
                    tracing::warn!(
                        fetched = response.results.len(),
                        next_cursor = response.next_cursor.as_deref().unwrap_or_default(),
                        "Query has more pages; only the first page is processed"
                    );
                }
                Some(response.results)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching Notion data");
                None
            }
        }
    }
}
