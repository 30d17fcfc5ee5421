//! Boundary service client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ClientError, TENANT_HEADER};
use crate::config::BoundaryConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Boundary {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[async_trait]
pub trait BoundaryLookup: Send + Sync {
    /// Boundaries known to the service among `codes`
    async fn find_boundaries(
        &self,
        tenant_id: &str,
        codes: &[String],
    ) -> Result<Vec<Boundary>, ClientError>;
}

pub struct HttpBoundaryClient {
    client: reqwest::Client,
    url: String,
}

impl HttpBoundaryClient {
    pub fn new(config: &BoundaryConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}/boundary/v1", config.host.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl BoundaryLookup for HttpBoundaryClient {
    async fn find_boundaries(
        &self,
        tenant_id: &str,
        codes: &[String],
    ) -> Result<Vec<Boundary>, ClientError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }
        let resp = self
            .client
            .get(&self.url)
            .query(&[("codes", codes.join(","))])
            .header(TENANT_HEADER, tenant_id)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn client(host: String) -> HttpBoundaryClient {
        HttpBoundaryClient::new(&BoundaryConfig {
            host,
            validation_enabled: true,
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_find_boundaries() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/boundary/v1")
                    .query_param("codes", "KA,KA-BLR")
                    .header("X-Tenant-ID", "t1");
                then.status(200).json_body(serde_json::json!([
                    {"code": "KA", "name": "Karnataka"},
                    {"code": "KA-BLR"}
                ]));
            })
            .await;

        let found = client(server.base_url())
            .find_boundaries("t1", &["KA".into(), "KA-BLR".into()])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name.as_deref(), Some("Karnataka"));
        assert!(found[1].name.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/boundary/v1");
                then.status(503);
            })
            .await;

        let err = client(server.base_url())
            .find_boundaries("t1", &["KA".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status(503)));
    }

    #[tokio::test]
    async fn test_no_codes_skips_request() {
        let found = client("http://127.0.0.1:9".into())
            .find_boundaries("t1", &[])
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
