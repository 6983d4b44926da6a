//! Core library for strata
//!
//! Resolves a named setting by trying lookup strategies in priority order
//! (flag, positional argument, exclusive boolean flags, config file,
//! environment variable, fixed default) and taking the first non-empty
//! answer.
//!
//! - [`strategy`]: the [`Strategy`] trait and its concrete sources
//! - [`chain`]: ordered fallback over strategies
//! - [`resolver`]: named registry of chains
//! - [`sources`]: the flag and config-store capabilities strategies read
//! - [`store`]: a TOML-backed [`ConfigStore`]

pub mod chain;
pub mod error;
pub mod home;
pub mod logging;
pub mod resolver;
pub mod sources;
pub mod store;
pub mod strategy;

pub use chain::{Chain, Resolution};
pub use error::{ConfigError, FlagError, ResolveError};
pub use resolver::Resolver;
pub use sources::{ConfigStore, FlagSource, ParsedFlags, StaticFlags};
pub use store::TomlConfigStore;
pub use strategy::Strategy;
