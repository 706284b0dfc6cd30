//! Core traits for the deployment tool
//!
//! This module defines the abstract interface the reconciler talks through.
//!
//! - [`DnsApi`]: zone-scoped DNS record operations against a provider API

pub mod dns_api;

pub use dns_api::{DnsApi, ExistingRecord, NewRecord};
