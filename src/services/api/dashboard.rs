use super::http::{ApiClientConfig, ApiError, HttpClient};
use crate::services::data::DashboardSnapshot;
use std::sync::Arc;
use tracing::debug;

/// Remote source serving the same snapshot the mock generator builds.
#[derive(Clone)]
pub struct DashboardClient {
    http: Arc<HttpClient>,
}

impl DashboardClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: Arc::new(HttpClient::new(config)?),
        })
    }

    pub async fn fetch_snapshot(&self) -> Result<DashboardSnapshot, ApiError> {
        debug!(base = %self.http.base_url(), "fetching dashboard snapshot");
        let response = self.http.get_json::<DashboardSnapshot>("snapshot").await?;
        debug!(status = %response.status, "dashboard snapshot received");
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::data::{DataSource, MockDataSource};
    use chrono::{TimeZone, Utc};
    use httpmock::prelude::*;
    use serde_json::json;

    fn fixture() -> DashboardSnapshot {
        MockDataSource::new(Utc.with_ymd_and_hms(2024, 11, 25, 12, 0, 0).unwrap()).snapshot()
    }

    #[tokio::test]
    async fn fetches_snapshot() {
        let server = MockServer::start();
        let expected = fixture();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/snapshot");
            then.status(200).json_body(serde_json::to_value(&expected).unwrap());
        });

        let config = ApiClientConfig::try_from_url(&server.url("/")).unwrap();
        let client = DashboardClient::new(config).unwrap();
        let snapshot = client.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.transactions.len(), expected.transactions.len());
        assert_eq!(snapshot.transactions[0].id, expected.transactions[0].id);
        assert_eq!(snapshot.transactions[0].date, expected.transactions[0].date);
        assert_eq!(snapshot.revenue.len(), 12);
        assert_eq!(snapshot.unread_notifications(), expected.unread_notifications());
        assert!((snapshot.stats.total_balance - expected.stats.total_balance).abs() < 1e-6);
    }

    #[tokio::test]
    async fn resolves_snapshot_relative_to_base_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v1/snapshot");
            then.status(200).json_body(serde_json::to_value(fixture()).unwrap());
        });

        let config = ApiClientConfig::try_from_url(&server.url("/v1/")).unwrap();
        let client = DashboardClient::new(config).unwrap();
        client.fetch_snapshot().await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn surfaces_http_errors_with_body() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/snapshot");
            then.status(503).body("maintenance");
        });

        let config = ApiClientConfig::try_from_url(&server.url("/")).unwrap();
        let client = DashboardClient::new(config).unwrap();
        match client.fetch_snapshot().await {
            Err(ApiError::HttpStatus { status, body }) => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejects_malformed_payloads() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/snapshot");
            then.status(200).json_body(json!({ "stats": "nope" }));
        });

        let config = ApiClientConfig::try_from_url(&server.url("/")).unwrap();
        let client = DashboardClient::new(config).unwrap();
        assert!(matches!(
            client.fetch_snapshot().await,
            Err(ApiError::Deserialize { .. })
        ));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            ApiClientConfig::try_from_url("not a url"),
            Err(ApiError::Url(_))
        ));
    }
}
