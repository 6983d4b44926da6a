//! Ordered fallback over strategies

use crate::error::ResolveError;
use crate::strategy::Strategy;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Successful resolution together with the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Resolved, never empty
    pub value: String,
    /// [`Strategy::describe`] of the answering strategy
    pub source: String,
    /// Zero-based position of the answering strategy in the chain
    pub position: usize,
}

/// Composed fallback chain
///
/// Strategies are tried in order. The first failure or the first non-empty
/// value ends the chain; empty values move on to the next strategy. A chain
/// that runs out of strategies fails with [`ResolveError::Exhausted`].
///
/// A `Chain` is itself a [`Strategy`], so chains nest.
#[derive(Clone, Default)]
pub struct Chain<'a> {
    strategies: Vec<Arc<dyn Strategy + 'a>>,
}

impl<'a> Chain<'a> {
    /// Build a chain from strategies in priority order.
    pub fn new(strategies: Vec<Arc<dyn Strategy + 'a>>) -> Self {
        Self { strategies }
    }

    /// Strategies in priority order.
    pub fn strategies(&self) -> &[Arc<dyn Strategy + 'a>] {
        &self.strategies
    }

    /// Number of strategies in the chain.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// True if the chain has no strategies.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Run the chain, reporting which strategy answered.
    pub fn resolve_traced(&self) -> Result<Resolution, ResolveError> {
        for (position, strategy) in self.strategies.iter().enumerate() {
            let value = match strategy.evaluate() {
                Ok(value) => value,
                Err(e) => {
                    debug!(position, source = %strategy.describe(), error = %e, "strategy failed");
                    return Err(e);
                }
            };

            if value.is_empty() {
                trace!(position, source = %strategy.describe(), "strategy returned no value");
                continue;
            }

            let source = strategy.describe();
            debug!(position, source = %source, "strategy resolved value");
            return Ok(Resolution {
                value,
                source,
                position,
            });
        }

        debug!(strategies = self.strategies.len(), "no strategy produced output");
        Err(ResolveError::Exhausted)
    }
}

impl Strategy for Chain<'_> {
    fn evaluate(&self) -> Result<String, ResolveError> {
        self.resolve_traced().map(|r| r.value)
    }

    fn describe(&self) -> String {
        let sources: Vec<String> = self.strategies.iter().map(|s| s.describe()).collect();
        format!("[{}]", sources.join(", "))
    }
}

impl fmt::Debug for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.strategies.iter().map(|s| s.describe()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{from_fn, value};

    fn chain_of(strategies: Vec<Arc<dyn Strategy>>) -> Chain<'static> {
        Chain::new(strategies)
    }

    #[test]
    fn test_empty_chain_is_exhausted() {
        let err = Chain::default().evaluate().unwrap_err();
        assert!(err.is_exhausted());
    }

    #[test]
    fn test_first_non_empty_wins() {
        let chain = chain_of(vec![
            Arc::new(value("")),
            Arc::new(value("second")),
            Arc::new(value("third")),
        ]);
        let res = chain.resolve_traced().unwrap();
        assert_eq!(res.value, "second");
        assert_eq!(res.position, 1);
        assert_eq!(res.source, "default \"second\"");
    }

    #[test]
    fn test_failure_stops_chain() {
        let chain = chain_of(vec![
            Arc::new(from_fn("broken", || {
                Err(ResolveError::Conflict {
                    enabled: vec!["x".into(), "y".into()],
                })
            })),
            Arc::new(value("unreached")),
        ]);
        let err = chain.evaluate().unwrap_err();
        assert!(matches!(err, ResolveError::Conflict { .. }));
    }

    #[test]
    fn test_all_empty_is_exhausted() {
        let chain = chain_of(vec![Arc::new(value("")), Arc::new(value(""))]);
        assert!(chain.evaluate().unwrap_err().is_exhausted());
    }

    #[test]
    fn test_nested_chain() {
        let inner = chain_of(vec![Arc::new(value("")), Arc::new(value("inner"))]);
        let outer = chain_of(vec![Arc::new(inner), Arc::new(value("outer"))]);
        assert_eq!(outer.evaluate().unwrap(), "inner");
    }

    #[test]
    fn test_describe_lists_sources() {
        let chain = chain_of(vec![
            Arc::new(value("a")),
            Arc::new(from_fn("stub", || Ok(String::new()))),
        ]);
        assert_eq!(chain.describe(), "[default \"a\", stub]");
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
    }
}
