//! Command-line argument parsing
//!
//! Arguments arrive as a flat list of `--key value` / `--flag` tokens and are
//! folded into an immutable [`Options`] value. The recognized keys live in a
//! fixed table; each key carries its own conversion (string passthrough,
//! integer parse, uppercase, or presence-implies-true). Unknown keys are
//! ignored and a malformed value for a recognized key skips that key without
//! aborting the parse.

use tracing::debug;

/// Default record TTL, 1 means "automatic" on the provider side
pub const DEFAULT_TTL: u32 = 1;

/// Default DNS record type
pub const DEFAULT_RECORD_TYPE: &str = "A";

/// Parsed command-line options
///
/// Populated once by [`Options::parse_from`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Zone alias, resolved to a provider zone id via the configuration
    pub zone: String,
    /// Record name, bare subdomain or fully qualified
    pub record_name: String,
    /// DNS record type, stored uppercased
    pub record_type: String,
    /// Record time-to-live in seconds, 1 = automatic
    pub ttl: u32,
    /// Whether the created record is proxied by the provider
    pub proxied: bool,
    /// Erase mode: delete the matching record instead of creating one
    pub erase: bool,
    /// Silent mode: suppress everything but errors
    pub silent: bool,
    /// Print usage and exit
    pub show_help: bool,
    /// Write a stub configuration file and exit
    pub regenerate: bool,
    /// Number of recognized keys that parsed successfully
    pub total_parsed: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            zone: String::new(),
            record_name: String::new(),
            record_type: DEFAULT_RECORD_TYPE.to_string(),
            ttl: DEFAULT_TTL,
            proxied: true,
            erase: false,
            silent: false,
            show_help: false,
            regenerate: false,
            total_parsed: 0,
        }
    }
}

/// Recognized argument keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgKey {
    Zone,
    Name,
    Ttl,
    Type,
    Proxied,
    Erase,
    Silent,
    Help,
    Regenerate,
}

/// Fixed mapping of flag name to key; everything else is ignored
const ARGUMENT_KEYS: &[(&str, ArgKey)] = &[
    ("zone", ArgKey::Zone),
    ("name", ArgKey::Name),
    ("ttl", ArgKey::Ttl),
    ("type", ArgKey::Type),
    ("proxied", ArgKey::Proxied),
    ("erase", ArgKey::Erase),
    ("silent", ArgKey::Silent),
    ("help", ArgKey::Help),
    ("regenerate", ArgKey::Regenerate),
];

impl ArgKey {
    fn lookup(name: &str) -> Option<Self> {
        ARGUMENT_KEYS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, arg)| *arg)
    }

    /// Value-taking keys consume the following token; presence flags do not
    fn takes_value(self) -> bool {
        matches!(self, ArgKey::Zone | ArgKey::Name | ArgKey::Ttl | ArgKey::Type)
    }
}

impl Options {
    /// Parse options from an iterator of raw command-line tokens
    /// (typically `std::env::args().skip(1)`).
    pub fn parse_from<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Options::default();
        let mut iter = tokens.into_iter().peekable();

        while let Some(token) = iter.next() {
            let Some(key_name) = token.strip_prefix("--") else {
                continue;
            };
            let Some(key) = ArgKey::lookup(key_name) else {
                debug!("ignoring unknown argument key: {}", key_name);
                continue;
            };

            let value = if key.takes_value()
                && iter.peek().is_some_and(|next| !next.starts_with("--"))
            {
                iter.next().unwrap_or_default()
            } else {
                String::new()
            };

            if options.apply(key, value.trim()) {
                options.total_parsed += 1;
            }
        }

        options
    }

    /// Apply one key/value pair; returns false when the value is malformed
    /// for the key so the caller can skip it without counting.
    fn apply(&mut self, key: ArgKey, value: &str) -> bool {
        match key {
            ArgKey::Zone => self.zone = value.to_string(),
            ArgKey::Name => self.record_name = value.to_string(),
            ArgKey::Type => self.record_type = value.to_uppercase(),
            ArgKey::Ttl => match value.parse::<u32>() {
                Ok(ttl) => self.ttl = ttl,
                Err(_) => {
                    debug!("skipping malformed --ttl value: {:?}", value);
                    return false;
                }
            },
            ArgKey::Proxied => self.proxied = true,
            ArgKey::Erase => self.erase = true,
            ArgKey::Silent => self.silent = true,
            ArgKey::Help => self.show_help = true,
            ArgKey::Regenerate => self.regenerate = true,
        }
        true
    }
}
