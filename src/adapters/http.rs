use crate::config::ProbeConfig;
use crate::domain::model::{DrRoleRow, ProcedureResponse};
use crate::domain::ports::{Pinger, ReplicationSource};
use crate::utils::error::{ProbeError, Result};
use async_trait::async_trait;
use reqwest::Client;

const PING_PARTITIONS: &str = "@PingPartitions";
const PING_PARTITIONS_PARAMS: &str = "[0]";
const STATISTICS: &str = "@Statistics";
const DRROLE_PARAMS: &str = r#"["DRROLE",0]"#;
const MAX_ERROR_BODY: usize = 256;

/// Calls system procedures through the database's HTTP JSON API.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    api_url: String,
    credentials: Option<(String, String)>,
}

impl HttpApiClient {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .build()?;

        let credentials = match (&config.user, &config.password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            api_url: config.api_url(),
            credentials,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub async fn call_procedure(
        &self,
        procedure: &str,
        parameters: &str,
    ) -> Result<ProcedureResponse> {
        let mut query = vec![("Procedure", procedure), ("Parameters", parameters)];
        if let Some((user, password)) = &self.credentials {
            query.push(("User", user.as_str()));
            query.push(("Password", password.as_str()));
        }

        tracing::debug!("Calling {} {} at {}", procedure, parameters, self.api_url);
        let response = self.client.get(&self.api_url).query(&query).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProbeError::HttpStatus {
                status: status.as_u16(),
                body: truncate(body.trim(), MAX_ERROR_BODY),
            });
        }

        ProcedureResponse::from_json(&body)
    }
}

#[async_trait]
impl Pinger for HttpApiClient {
    async fn ping_partitions(&self) -> Result<ProcedureResponse> {
        self.call_procedure(PING_PARTITIONS, PING_PARTITIONS_PARAMS)
            .await
    }
}

#[async_trait]
impl ReplicationSource for HttpApiClient {
    async fn dr_roles(&self) -> Result<Vec<DrRoleRow>> {
        let response = self.call_procedure(STATISTICS, DRROLE_PARAMS).await?;
        if !response.is_success() {
            return Err(ProbeError::ProcedureFailed {
                procedure: STATISTICS.to_string(),
                status_line: response.status_line(),
            });
        }
        response.rows()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
