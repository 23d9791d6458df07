use super::response::parse_verdict;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use sinkhole_dns_application::ports::OracleClient;
use sinkhole_dns_domain::config::OracleConfig;
use sinkhole_dns_domain::{DomainError, Verdict};
use std::time::Duration;
use tracing::debug;

/// reqwest-backed oracle client.
///
/// `GET {url}/{client}/{query}/{qname}` with the access token header,
/// `Content-Type: application/json` and, for a positive client id, the
/// client id header.
pub struct HttpOracleClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOracleClient {
    pub fn new(config: &OracleConfig) -> Result<Self, DomainError> {
        let headers = default_headers(config)?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("sinkhole-dns/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .pool_max_idle_per_host(16)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build oracle client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, client_address: &str, query_value: &str, trimmed_qname: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url, client_address, query_value, trimmed_qname
        )
    }
}

fn default_headers(config: &OracleConfig) -> Result<HeaderMap, DomainError> {
    let mut headers = HeaderMap::new();

    let token_name = HeaderName::from_bytes(config.access_token_header.as_bytes())
        .map_err(|e| DomainError::ConfigError(format!("Invalid access token header: {}", e)))?;
    let token_value = HeaderValue::from_str(&config.access_token)
        .map_err(|e| DomainError::ConfigError(format!("Invalid access token value: {}", e)))?;
    headers.insert(token_name, token_value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if config.client_id > 0 {
        let id_name = HeaderName::from_bytes(config.client_id_header.as_bytes())
            .map_err(|e| DomainError::ConfigError(format!("Invalid client id header: {}", e)))?;
        headers.insert(id_name, HeaderValue::from(config.client_id));
    }

    Ok(headers)
}

#[async_trait]
impl OracleClient for HttpOracleClient {
    async fn fetch_verdict(
        &self,
        client_address: &str,
        query_value: &str,
        trimmed_qname: &str,
    ) -> Result<Verdict, DomainError> {
        let url = self.endpoint(client_address, query_value, trimmed_qname);
        debug!(url = %url, "Oracle request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::OracleTransport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(DomainError::OracleStatus {
                url,
                status: status.as_u16(),
                at: Utc::now(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::OracleTransport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        parse_verdict(&body)
    }
}
