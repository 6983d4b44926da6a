//! Capabilities that strategies read from
//!
//! Strategies never parse command lines or config files themselves. They are
//! handed a [`FlagSource`] (satisfied by [`ParsedFlags`] over clap matches)
//! or an accessor returning a [`ConfigStore`], and only consult them when
//! evaluated.

use crate::error::{ConfigError, FlagError};
use clap::{ArgMatches, Command};
use clap::parser::MatchesError;
use std::collections::HashMap;
use std::sync::Arc;

/// Read access to parsed command-line flags
pub trait FlagSource: Send + Sync {
    /// Current value of a string flag; `""` when declared but not given.
    fn get_string(&self, name: &str) -> Result<String, FlagError>;

    /// Current value of a boolean flag; `false` when declared but not given.
    fn get_bool(&self, name: &str) -> Result<bool, FlagError>;
}

impl<T: FlagSource + ?Sized> FlagSource for &T {
    fn get_string(&self, name: &str) -> Result<String, FlagError> {
        (**self).get_string(name)
    }

    fn get_bool(&self, name: &str) -> Result<bool, FlagError> {
        (**self).get_bool(name)
    }
}

impl<T: FlagSource + ?Sized> FlagSource for Arc<T> {
    fn get_string(&self, name: &str) -> Result<String, FlagError> {
        (**self).get_string(name)
    }

    fn get_bool(&self, name: &str) -> Result<bool, FlagError> {
        (**self).get_bool(name)
    }
}

fn flag_error(name: &str, expected: &'static str, err: MatchesError) -> FlagError {
    match err {
        MatchesError::Downcast { .. } => FlagError::WrongType {
            name: name.to_string(),
            expected,
        },
        _ => FlagError::Undefined(name.to_string()),
    }
}

/// Parsed flags of one clap command
///
/// Holds the ids of the arguments `command` declares next to its matches.
/// `ArgMatches` alone only rejects unknown ids in debug builds, so declared
/// ids are checked here before every lookup.
#[derive(Debug, Clone)]
pub struct ParsedFlags<'a> {
    declared: Vec<String>,
    matches: &'a ArgMatches,
}

impl<'a> ParsedFlags<'a> {
    /// Pair `matches` with the command they were parsed by.
    pub fn new(command: &Command, matches: &'a ArgMatches) -> Self {
        Self {
            declared: command
                .get_arguments()
                .map(|arg| arg.get_id().as_str().to_string())
                .collect(),
            matches,
        }
    }

    fn check_declared(&self, name: &str) -> Result<(), FlagError> {
        if self.declared.iter().any(|id| id == name) {
            Ok(())
        } else {
            Err(FlagError::Undefined(name.to_string()))
        }
    }
}

impl FlagSource for ParsedFlags<'_> {
    fn get_string(&self, name: &str) -> Result<String, FlagError> {
        self.check_declared(name)?;
        self.matches
            .try_get_one::<String>(name)
            .map(|v| v.cloned().unwrap_or_default())
            .map_err(|e| flag_error(name, "string", e))
    }

    fn get_bool(&self, name: &str) -> Result<bool, FlagError> {
        self.check_declared(name)?;
        self.matches
            .try_get_one::<bool>(name)
            .map(|v| v.copied().unwrap_or(false))
            .map_err(|e| flag_error(name, "bool", e))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlagValue {
    Str(String),
    Bool(bool),
}

/// Map-backed [`FlagSource`] for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct StaticFlags {
    flags: HashMap<String, FlagValue>,
}

impl StaticFlags {
    /// Empty flag set; every lookup fails with [`FlagError::Undefined`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a string flag with the given value.
    pub fn with_string(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.flags.insert(name.into(), FlagValue::Str(value.into()));
        self
    }

    /// Declare a boolean flag with the given value.
    pub fn with_bool(mut self, name: impl Into<String>, value: bool) -> Self {
        self.flags.insert(name.into(), FlagValue::Bool(value));
        self
    }
}

impl FlagSource for StaticFlags {
    fn get_string(&self, name: &str) -> Result<String, FlagError> {
        match self.flags.get(name) {
            Some(FlagValue::Str(s)) => Ok(s.clone()),
            Some(FlagValue::Bool(_)) => Err(FlagError::WrongType {
                name: name.to_string(),
                expected: "string",
            }),
            None => Err(FlagError::Undefined(name.to_string())),
        }
    }

    fn get_bool(&self, name: &str) -> Result<bool, FlagError> {
        match self.flags.get(name) {
            Some(FlagValue::Bool(b)) => Ok(*b),
            Some(FlagValue::Str(_)) => Err(FlagError::WrongType {
                name: name.to_string(),
                expected: "bool",
            }),
            None => Err(FlagError::Undefined(name.to_string())),
        }
    }
}

/// Persisted settings, looked up by scope (e.g. a hostname) and key
pub trait ConfigStore {
    /// Value stored for `key` under `scope`; `""` when nothing is stored.
    fn get(&self, scope: &str, key: &str) -> Result<String, ConfigError>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn get(&self, scope: &str, key: &str) -> Result<String, ConfigError> {
        (**self).get(scope, key)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Arc<T> {
    fn get(&self, scope: &str, key: &str) -> Result<String, ConfigError> {
        (**self).get(scope, key)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Box<T> {
    fn get(&self, scope: &str, key: &str) -> Result<String, ConfigError> {
        (**self).get(scope, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, ArgAction, Command};

    fn command() -> Command {
        Command::new("test")
            .arg(Arg::new("editor").long("editor"))
            .arg(Arg::new("ssh").long("ssh").action(ArgAction::SetTrue))
    }

    #[test]
    fn test_parsed_flags_string_flag_given() {
        let command = command();
        let matches = command.clone().get_matches_from(["test", "--editor", "vim"]);
        let flags = ParsedFlags::new(&command, &matches);
        assert_eq!(flags.get_string("editor").unwrap(), "vim");
    }

    #[test]
    fn test_parsed_flags_string_flag_absent_is_empty() {
        let command = command();
        let matches = command.clone().get_matches_from(["test"]);
        let flags = ParsedFlags::new(&command, &matches);
        assert_eq!(flags.get_string("editor").unwrap(), "");
    }

    #[test]
    fn test_parsed_flags_bool_flag() {
        let command = command();
        let matches = command.clone().get_matches_from(["test", "--ssh"]);
        assert!(ParsedFlags::new(&command, &matches).get_bool("ssh").unwrap());

        let matches = command.clone().get_matches_from(["test"]);
        assert!(!ParsedFlags::new(&command, &matches).get_bool("ssh").unwrap());
    }

    // Holds in release builds too, where clap skips its own id check.
    #[test]
    fn test_parsed_flags_undeclared_flag_fails() {
        let command = command();
        let matches = command.clone().get_matches_from(["test"]);
        let flags = ParsedFlags::new(&command, &matches);

        let err = flags.get_string("nope").unwrap_err();
        assert!(matches!(err, FlagError::Undefined(ref n) if n == "nope"));
        let err = flags.get_bool("nope").unwrap_err();
        assert!(matches!(err, FlagError::Undefined(ref n) if n == "nope"));
    }

    #[test]
    fn test_parsed_flags_wrong_type() {
        let command = command();
        let matches = command.clone().get_matches_from(["test", "--ssh"]);
        let flags = ParsedFlags::new(&command, &matches);

        let err = flags.get_string("ssh").unwrap_err();
        assert!(matches!(err, FlagError::WrongType { expected: "string", .. }));
        let err = flags.get_bool("editor").unwrap_err();
        assert!(matches!(err, FlagError::WrongType { expected: "bool", .. }));
    }

    #[test]
    fn test_static_flags() {
        let flags = StaticFlags::new()
            .with_string("editor", "emacs")
            .with_bool("ssh", true);

        assert_eq!(flags.get_string("editor").unwrap(), "emacs");
        assert!(flags.get_bool("ssh").unwrap());
        assert!(matches!(
            flags.get_bool("editor"),
            Err(FlagError::WrongType { expected: "bool", .. })
        ));
        assert!(matches!(flags.get_string("missing"), Err(FlagError::Undefined(_))));
    }
}
