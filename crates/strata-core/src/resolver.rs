//! Named registry of fallback chains
//!
//! A [`Resolver`] maps setting names to strategies in priority order. It is
//! populated once at startup and then queried read-only:
//!
//! ```
//! use strata_core::strategy::{env, value};
//! use strata_core::Resolver;
//!
//! let mut resolver = Resolver::new();
//! resolver.register("editor", env("STRATA_DOC_EDITOR_UNSET"));
//! resolver.register("editor", value("vim"));
//!
//! assert_eq!(resolver.resolve("editor").unwrap(), "vim");
//! ```

use crate::chain::{Chain, Resolution};
use crate::error::ResolveError;
use crate::strategy::Strategy;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry mapping setting names to ordered strategies
#[derive(Clone, Default)]
pub struct Resolver<'a> {
    strategies: BTreeMap<String, Vec<Arc<dyn Strategy + 'a>>>,
}

impl<'a> Resolver<'a> {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `strategy` to the chain for `name`.
    ///
    /// Registration order is priority order. Re-registering under a name
    /// appends; nothing is replaced or de-duplicated.
    pub fn register<S>(&mut self, name: impl Into<String>, strategy: S)
    where
        S: Strategy + 'a,
    {
        self.register_arc(name, Arc::new(strategy));
    }

    /// Append an already shared strategy to the chain for `name`.
    pub fn register_arc(&mut self, name: impl Into<String>, strategy: Arc<dyn Strategy + 'a>) {
        self.strategies.entry(name.into()).or_default().push(strategy);
    }

    /// Builder form of [`Resolver::register`].
    pub fn with<S>(mut self, name: impl Into<String>, strategy: S) -> Self
    where
        S: Strategy + 'a,
    {
        self.register(name, strategy);
        self
    }

    /// Strategies registered for `name`, in priority order; empty if none.
    pub fn strategies_for(&self, name: &str) -> &[Arc<dyn Strategy + 'a>] {
        self.strategies.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Compose the chain for `name` without running it.
    ///
    /// The returned chain is a snapshot: registrations made afterwards are
    /// not seen by it.
    pub fn compiled(&self, name: &str) -> Chain<'a> {
        Chain::new(self.strategies_for(name).to_vec())
    }

    /// Resolve `name` through its chain.
    ///
    /// Errors from the chain are returned unchanged.
    pub fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        self.compiled(name).evaluate()
    }

    /// Resolve `name`, reporting which strategy answered.
    pub fn resolve_traced(&self, name: &str) -> Result<Resolution, ResolveError> {
        self.compiled(name).resolve_traced()
    }

    /// Registered setting names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }

    /// True if at least one strategy is registered for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.strategies
                    .iter()
                    .map(|(name, list)| (name, list.iter().map(|s| s.describe()).collect::<Vec<_>>())),
            )
            .finish()
    }
}
