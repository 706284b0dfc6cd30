// # DNS API Trait
//
// Defines the interface for the provider's zone-scoped DNS-records resource.
//
// ## Implementations
//
// - Cloudflare: `dnsdeploy-provider-cloudflare` crate
//
// The reconciler only ever issues three calls through this trait: one list,
// then at most one create or one delete. Implementations are stateless and
// single-shot: one HTTP request per method call, errors propagated to the
// caller, no retry or backoff logic of their own.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A DNS record as returned by the provider's listing endpoint
///
/// Fixed to the subset of fields this tool consumes; every other payload
/// field is dropped at decode time instead of being absorbed dynamically.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExistingRecord {
    /// Provider-assigned record id, used for deletion
    pub id: String,
    /// Fully qualified record name
    pub name: String,
    /// Record type (A, AAAA, CNAME, ...)
    #[serde(rename = "type")]
    pub record_type: String,
}

/// Request parameters for creating a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecord {
    /// Record name relative to the zone
    pub name: String,
    /// Record type (A, AAAA, CNAME, ...)
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time-to-live in seconds, 1 = automatic
    pub ttl: u32,
    /// Whether the record is proxied by the provider
    pub proxied: bool,
    /// Record content, typically the hosting machine's address
    pub content: String,
}

/// Trait for the provider's zone-scoped DNS-records resource
///
/// # Thread Safety
///
/// Implementations must be usable across async tasks.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// List the records of a zone
    ///
    /// Returns whatever the provider hands back in a single response. No
    /// pagination is followed: a zone whose records span multiple pages can
    /// miss matches beyond the first page. Known limitation, inherited from
    /// the original deployment flow where zones stay well below a page.
    async fn list_records(&self, zone_id: &str) -> Result<Vec<ExistingRecord>>;

    /// Create one record in a zone
    async fn create_record(&self, zone_id: &str, record: &NewRecord) -> Result<()>;

    /// Delete one record from a zone by its provider-assigned id
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}
