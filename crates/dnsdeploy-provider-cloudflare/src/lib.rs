// # Cloudflare DNS API Client
//
// `DnsApi` implementation against the Cloudflare API v4 zone-scoped
// `dns_records` resource.
//
// - Makes exactly one HTTP request per trait method call
// - NO retry, backoff, or caching (any failure aborts the run)
// - Listing fetches a single page; pagination is intentionally not followed
// - The API credential never appears in logs or `Debug` output
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List DNS Records: GET `/zones/:zone_id/dns_records`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Delete DNS Record: DELETE `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use dnsdeploy_core::error::{ApiErrorDetail, Error, Result};
use dnsdeploy_core::traits::{DnsApi, ExistingRecord, NewRecord};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Response envelope shared by all Cloudflare v4 endpoints
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
    #[serde(default)]
    result: Value,
}

/// Cloudflare DNS API client
///
/// Holds the bearer credential and a reqwest client with a fixed timeout.
/// Stateless between calls.
pub struct CloudflareApi {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareApi")
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

impl CloudflareApi {
    /// Create a new client for the given API token
    ///
    /// Fails fast on an empty token so no unauthenticated request is ever
    /// attempted.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config_invalid("Cloudflare API token is empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { api_token, client })
    }

    /// Send one request and unwrap the Cloudflare response envelope
    ///
    /// A non-success HTTP status becomes `Error::Transport`; an envelope
    /// with `success: false` becomes `Error::Api` carrying the provider's
    /// structured error list. On success the `result` payload is returned.
    async fn request(&self, method: Method, url: &str, body: Option<Value>) -> Result<Value> {
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(status.as_u16()));
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| Error::http(format!("failed to parse response: {}", e)))?;

        if !envelope.success {
            return Err(Error::Api(envelope.errors));
        }

        Ok(envelope.result)
    }
}

/// URL of a zone's dns_records collection
fn records_url(zone_id: &str) -> String {
    format!("{}/zones/{}/dns_records", CLOUDFLARE_API_BASE, zone_id)
}

/// URL of one record within a zone
fn record_url(zone_id: &str, record_id: &str) -> String {
    format!("{}/{}", records_url(zone_id), record_id)
}

#[async_trait]
impl DnsApi for CloudflareApi {
    async fn list_records(&self, zone_id: &str) -> Result<Vec<ExistingRecord>> {
        let result = self
            .request(Method::GET, &records_url(zone_id), None)
            .await?;
        let records: Vec<ExistingRecord> = serde_json::from_value(result)?;
        Ok(records)
    }

    async fn create_record(&self, zone_id: &str, record: &NewRecord) -> Result<()> {
        let body = serde_json::to_value(record)?;
        self.request(Method::POST, &records_url(zone_id), Some(body))
            .await?;
        Ok(())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.request(Method::DELETE, &record_url(zone_id, record_id), None)
            .await?;
        Ok(())
    }
}
