//! Record reconciliation
//!
//! The [`Reconciler`] is the decision procedure at the center of the tool:
//! given validated options, the loaded configuration, and the list of records
//! fetched for the target zone, it decides whether the run is a no-op, a
//! create, or a delete, and then issues at most one mutating API call.
//!
//! ## Flow
//!
//! 1. Construction validates all inputs, before any network call
//! 2. `run` fetches the zone's records (one list call)
//! 3. `decide` picks one of {AlreadyExists, NotFoundForErase, Create, Delete}
//! 4. Terminal results end the run; Create/Delete issue exactly one mutation
//!
//! There are no retries at any step: a transport or API failure aborts the
//! whole run.

use crate::args::Options;
use crate::config::DeployConfig;
use crate::error::{Error, Result, MIN_PARSED_ARGUMENTS};
use crate::traits::{DnsApi, ExistingRecord, NewRecord};
use tracing::info;

/// Minimum number of letters a record name must keep after stripping
const MIN_NAME_LETTERS: usize = 3;

/// Outcome of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// A record with the target name already exists; nothing was changed
    AlreadyExists,
    /// Erase mode found no record with the target name; nothing was changed
    NotFoundForErase,
    /// The record was absent and a create call was issued with these parameters
    Create(NewRecord),
    /// Erase mode matched a record and a delete call was issued for this id
    Delete {
        /// Provider-assigned id of the deleted record
        record_id: String,
    },
}

/// The reconciliation decision procedure
///
/// Holds borrowed, already-validated inputs for a single run. Construction
/// fails fast on any invalid input so that no network call is ever made with
/// bad parameters.
#[derive(Debug)]
pub struct Reconciler<'a> {
    options: &'a Options,
    config: &'a DeployConfig,
    base_name: String,
}

impl<'a> Reconciler<'a> {
    /// Validate inputs and build a reconciler
    ///
    /// Checks, in order:
    ///
    /// 1. at least two recognized arguments were parsed
    /// 2. the zone alias is non-empty
    /// 3. the record name is non-empty
    /// 4. the zone alias exists in the configured mapping
    /// 5. the record name keeps at least 3 characters once everything that
    ///    is not a letter is stripped
    pub fn new(options: &'a Options, config: &'a DeployConfig) -> Result<Self> {
        if options.total_parsed < MIN_PARSED_ARGUMENTS {
            return Err(Error::InsufficientArguments(options.total_parsed));
        }
        if options.zone.is_empty() {
            return Err(Error::MissingZone);
        }
        if options.record_name.is_empty() {
            return Err(Error::MissingName);
        }
        if !config.zones.contains_key(&options.zone) {
            return Err(Error::UnknownZone(options.zone.clone()));
        }

        let letters = options
            .record_name
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .count();
        if letters < MIN_NAME_LETTERS {
            return Err(Error::InvalidName(options.record_name.clone()));
        }

        let base_name = base_record_name(&options.record_name, &options.zone);
        Ok(Self {
            options,
            config,
            base_name,
        })
    }

    /// Provider zone id for the validated zone alias
    pub fn zone_id(&self) -> &str {
        // the alias was checked against the mapping during construction
        &self.config.zones[&self.options.zone]
    }

    /// Record name with the zone suffix stripped, lower-cased
    pub fn base_record_name(&self) -> &str {
        &self.base_name
    }

    /// Fully qualified target name used for matching
    pub fn target_name(&self) -> String {
        format!("{}.{}", self.base_name, self.options.zone.to_lowercase())
    }

    /// Decide what this run should do given the zone's existing records
    ///
    /// Pure function of the inputs: no network access, no side effects.
    /// Matching is case-insensitive against the fully qualified target name.
    pub fn decide(&self, existing: &[ExistingRecord]) -> Reconciliation {
        let target = self.target_name();
        let matched = existing
            .iter()
            .find(|record| record.name.trim().to_lowercase() == target);

        if self.options.erase {
            match matched {
                Some(record) => Reconciliation::Delete {
                    record_id: record.id.clone(),
                },
                None => Reconciliation::NotFoundForErase,
            }
        } else {
            match matched {
                Some(_) => Reconciliation::AlreadyExists,
                None => Reconciliation::Create(NewRecord {
                    name: self.base_name.clone(),
                    record_type: self.options.record_type.clone(),
                    ttl: self.options.ttl,
                    proxied: self.options.proxied,
                    content: self.config.hosting.clone(),
                }),
            }
        }
    }

    /// Run the reconciliation against the provider
    ///
    /// One list call, a decision, then at most one mutation. The returned
    /// [`Reconciliation`] describes what was (or was not) done.
    pub async fn run(&self, api: &dyn DnsApi) -> Result<Reconciliation> {
        let zone_id = self.zone_id();
        info!("requesting DNS records list for zone: {}", zone_id);
        let existing = api.list_records(zone_id).await?;

        let decision = self.decide(&existing);
        match &decision {
            Reconciliation::AlreadyExists => {
                info!("record already exists: {}", self.target_name());
            }
            Reconciliation::NotFoundForErase => {
                info!("record does not exist: {}", self.target_name());
            }
            Reconciliation::Create(record) => {
                info!(
                    "creating DNS record: {} (type {}, ttl {}, proxied {})",
                    self.target_name(),
                    record.record_type,
                    record.ttl,
                    record.proxied
                );
                api.create_record(zone_id, record).await?;
            }
            Reconciliation::Delete { record_id } => {
                // unreachable given matching above, checked anyway
                if record_id.is_empty() {
                    return Err(Error::InvalidRecordIdentifier(record_id.clone()));
                }
                info!("erasing DNS record: {}", self.target_name());
                api.delete_record(zone_id, record_id).await?;
            }
        }

        Ok(decision)
    }
}

/// Lower-case the record name and drop one trailing `.<zone>` suffix, so a
/// caller may pass either the bare subdomain or the fully qualified form.
fn base_record_name(record_name: &str, zone: &str) -> String {
    let name = record_name.trim().to_lowercase();
    let suffix = format!(".{}", zone.trim().to_lowercase());
    match name.strip_suffix(&suffix) {
        Some(base) => base.to_string(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DeployConfig {
        let raw = r#"{
            "key": "tok",
            "hosting": "203.0.113.7",
            "zones": {"example.org": "zone-1"}
        }"#;
        serde_json::from_str(raw).expect("test config")
    }

    fn test_options(zone: &str, name: &str) -> Options {
        Options {
            zone: zone.to_string(),
            record_name: name.to_string(),
            total_parsed: 2,
            ..Options::default()
        }
    }

    fn record(id: &str, name: &str) -> ExistingRecord {
        ExistingRecord {
            id: id.to_string(),
            name: name.to_string(),
            record_type: "A".to_string(),
        }
    }

    #[test]
    fn too_few_arguments_rejected() {
        let config = test_config();
        let mut options = test_options("example.org", "api");
        options.total_parsed = 1;

        let err = Reconciler::new(&options, &config).unwrap_err();
        assert!(matches!(err, Error::InsufficientArguments(1)));
    }

    #[test]
    fn empty_zone_rejected() {
        let config = test_config();
        let options = test_options("", "api");
        let err = Reconciler::new(&options, &config).unwrap_err();
        assert!(matches!(err, Error::MissingZone));
    }

    #[test]
    fn empty_name_rejected() {
        let config = test_config();
        let options = test_options("example.org", "");
        let err = Reconciler::new(&options, &config).unwrap_err();
        assert!(matches!(err, Error::MissingName));
    }

    #[test]
    fn unknown_zone_rejected() {
        let config = test_config();
        let options = test_options("other.net", "api");
        let err = Reconciler::new(&options, &config).unwrap_err();
        assert!(matches!(err, Error::UnknownZone(zone) if zone == "other.net"));
    }

    #[test]
    fn short_name_rejected_regardless_of_decoration() {
        let config = test_config();
        // two letters once digits and punctuation are stripped
        for name in ["ab", "a-1.b", "12345", "x.y"] {
            let options = test_options("example.org", name);
            let err = Reconciler::new(&options, &config).unwrap_err();
            assert!(
                matches!(err, Error::InvalidName(_)),
                "expected InvalidName for {:?}",
                name
            );
        }
    }

    #[test]
    fn fqdn_and_bare_name_share_base() {
        let config = test_config();

        let bare = test_options("example.org", "sub");
        let fqdn = test_options("example.org", "sub.example.org");

        let bare = Reconciler::new(&bare, &config).expect("bare");
        let fqdn = Reconciler::new(&fqdn, &config).expect("fqdn");

        assert_eq!(bare.base_record_name(), "sub");
        assert_eq!(fqdn.base_record_name(), "sub");
        assert_eq!(bare.target_name(), fqdn.target_name());
    }

    #[test]
    fn suffix_strip_only_removes_trailing_zone() {
        // the zone string appearing in the middle of the name stays intact
        assert_eq!(
            base_record_name("example.org.mirror", "example.org"),
            "example.org.mirror"
        );
        assert_eq!(base_record_name("API.Example.ORG", "example.org"), "api");
    }

    #[test]
    fn existing_record_yields_already_exists() {
        let config = test_config();
        let options = test_options("example.org", "api");
        let reconciler = Reconciler::new(&options, &config).expect("reconciler");

        let existing = vec![record("rec-1", "api.example.org")];
        assert_eq!(reconciler.decide(&existing), Reconciliation::AlreadyExists);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let config = test_config();
        let options = test_options("example.org", "API");
        let reconciler = Reconciler::new(&options, &config).expect("reconciler");

        let existing = vec![record("rec-1", "Api.Example.Org")];
        assert_eq!(reconciler.decide(&existing), Reconciliation::AlreadyExists);
    }

    #[test]
    fn absent_record_yields_create_with_configured_content() {
        let config = test_config();
        let options = test_options("example.org", "www");
        let reconciler = Reconciler::new(&options, &config).expect("reconciler");

        let existing = vec![record("rec-1", "api.example.org")];
        match reconciler.decide(&existing) {
            Reconciliation::Create(new_record) => {
                assert_eq!(new_record.name, "www");
                assert_eq!(new_record.record_type, "A");
                assert_eq!(new_record.ttl, 1);
                assert!(new_record.proxied);
                assert_eq!(new_record.content, "203.0.113.7");
            }
            other => panic!("expected Create, got {:?}", other),
        }
    }

    #[test]
    fn erase_mode_matches_record_id() {
        let config = test_config();
        let mut options = test_options("example.org", "api");
        options.erase = true;
        let reconciler = Reconciler::new(&options, &config).expect("reconciler");

        let existing = vec![
            record("rec-0", "www.example.org"),
            record("rec-1", "api.example.org"),
        ];
        assert_eq!(
            reconciler.decide(&existing),
            Reconciliation::Delete {
                record_id: "rec-1".to_string()
            }
        );
    }

    #[test]
    fn erase_mode_without_match_is_terminal() {
        let config = test_config();
        let mut options = test_options("example.org", "www");
        options.erase = true;
        let reconciler = Reconciler::new(&options, &config).expect("reconciler");

        let existing = vec![record("rec-1", "api.example.org")];
        assert_eq!(
            reconciler.decide(&existing),
            Reconciliation::NotFoundForErase
        );
    }

    #[test]
    fn zone_id_resolves_through_mapping() {
        let config = test_config();
        let options = test_options("example.org", "api");
        let reconciler = Reconciler::new(&options, &config).expect("reconciler");
        assert_eq!(reconciler.zone_id(), "zone-1");
    }

    #[test]
    fn validation_order_reports_missing_zone_before_unknown_zone() {
        // an empty zone is MissingZone even though it is also absent
        // from the mapping
        let config = test_config();
        let options = test_options("", "api");
        let err = Reconciler::new(&options, &config).unwrap_err();
        assert!(matches!(err, Error::MissingZone));
    }
}
