// # dnsdeploy-core
//
// Core library for the single-record DNS deployment tool.
//
// ## Architecture Overview
//
// One invocation reconciles exactly one DNS record in one zone:
//
// - **args**: fold raw `--key value` tokens into an immutable `Options`
// - **config**: load the credential/zone-mapping file, regenerate a stub
// - **DnsApi**: trait boundary for the provider's DNS-records resource
// - **Reconciler**: validate inputs, fetch the zone's records, decide
//   no-op / create / delete, and issue at most one mutating call
//
// ## Design Principles
//
// 1. **Validate before the network**: every precondition is checked before
//    any API call is made
// 2. **Explicit state**: configuration is one immutable value passed to
//    whoever needs it, never global
// 3. **Single-shot**: no retries, no backoff; any failure aborts the run

pub mod args;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod traits;

// Re-export core types for convenience
pub use args::Options;
pub use config::{regenerate, DeployConfig, RegenerateOutcome, CONFIG_FILE_NAME};
pub use error::{ApiErrorDetail, Error, Result};
pub use reconcile::{Reconciler, Reconciliation};
pub use traits::{DnsApi, ExistingRecord, NewRecord};
