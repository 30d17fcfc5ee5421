//! ID generation client
//!
//! One POST per requested id. Any per-item failure is replaced by a locally
//! generated fallback, so a batch never fails because the remote is down.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ClientError, TENANT_HEADER};
use crate::config::IdGenConfig;

#[async_trait]
pub trait IdGenerator: Send + Sync {
    /// Exactly `count` ids. `ORG` defaults to the tenant id in the variables.
    async fn generate_ids(
        &self,
        tenant_id: &str,
        count: usize,
        custom_vars: &HashMap<String, String>,
    ) -> Result<Vec<String>, ClientError>;
}

/// `EMP-` followed by 8 lowercase hex characters
pub fn fallback_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("EMP-{}", &hex[..8])
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    template_code: &'a str,
    variables: &'a HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    id: String,
}

pub struct HttpIdGenerator {
    client: reqwest::Client,
    url: String,
    template_code: String,
    enabled: bool,
}

impl HttpIdGenerator {
    pub fn new(config: &IdGenConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}{}", config.host.trim_end_matches('/'), config.path),
            template_code: config.name.clone(),
            enabled: config.enabled,
        })
    }

    async fn request_one(
        &self,
        tenant_id: &str,
        variables: &HashMap<String, String>,
    ) -> Result<String, ClientError> {
        let resp = self
            .client
            .post(&self.url)
            .header(TENANT_HEADER, tenant_id)
            .json(&GenerateRequest {
                template_code: &self.template_code,
                variables,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }
        let body: GenerateResponse = resp.json().await?;
        if body.id.trim().is_empty() {
            return Err(ClientError::Malformed("empty id".into()));
        }
        Ok(body.id)
    }
}

#[async_trait]
impl IdGenerator for HttpIdGenerator {
    async fn generate_ids(
        &self,
        tenant_id: &str,
        count: usize,
        custom_vars: &HashMap<String, String>,
    ) -> Result<Vec<String>, ClientError> {
        if !self.enabled {
            return Ok((0..count).map(|_| fallback_id()).collect());
        }

        let mut variables = custom_vars.clone();
        variables
            .entry("ORG".to_string())
            .or_insert_with(|| tenant_id.to_string());

        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let id = match self.request_one(tenant_id, &variables).await {
                Ok(id) => id,
                Err(e) => {
                    let id = fallback_id();
                    tracing::warn!(tenant_id = %tenant_id, error = %e, fallback = %id, "ID generation failed, using fallback id");
                    id
                }
            };
            ids.push(id);
        }
        Ok(ids)
    }
}
