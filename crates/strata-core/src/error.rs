//! Error types for setting resolution

use thiserror::Error;

/// Boxed error carried by [`ResolveError::SourceUnavailable`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Resolution error
///
/// Strategies never recover from failures internally; whatever a strategy
/// returns is propagated through the chain unchanged.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A strategy's underlying source could not be read
    #[error("{origin} unavailable: {source}")]
    SourceUnavailable {
        /// Label of the failing source, e.g. `flag --editor`
        origin: String,
        /// Underlying cause
        #[source]
        source: BoxError,
    },

    /// More than one of a set of mutually exclusive boolean flags was enabled
    #[error("expected exactly one of boolean flags to be true (enabled: {})", .enabled.join(", "))]
    Conflict {
        /// Every flag that was found enabled
        enabled: Vec<String>,
    },

    /// Every strategy returned an empty value and none failed
    #[error("no strategies resulted in output")]
    Exhausted,
}

impl ResolveError {
    /// Wrap a source failure with the label of the strategy that hit it.
    pub fn unavailable(origin: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::SourceUnavailable {
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// True when no configured source had a value.
    ///
    /// Callers use this to decide between an application-level default and
    /// reporting a real failure.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Flag lookup error
#[derive(Debug, Error)]
pub enum FlagError {
    /// The flag was never declared on the command
    #[error("flag '{0}' is not defined")]
    Undefined(String),

    /// The flag exists but holds a value of another type
    #[error("flag '{name}' is not a {expected} flag")]
    WrongType {
        /// Flag name
        name: String,
        /// Type the caller asked for
        expected: &'static str,
    },
}

/// Configuration store error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A key exists but does not hold a string
    #[error("config key '{key}' is not a string (found {found})")]
    NotAString {
        /// Offending key
        key: String,
        /// TOML type name of the stored value
        found: &'static str,
    },
}
