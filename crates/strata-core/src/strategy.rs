//! Lookup strategies
//!
//! A [`Strategy`] is a zero-argument lookup yielding a value, an empty value
//! ("no answer, try the next one"), or a failure. Each concrete strategy holds
//! only the parameters it needs and performs no I/O until evaluated.
//!
//! | Strategy | Answers with | Fails when |
//! |---|---|---|
//! | [`Env`] | the variable's value, `""` when unset | never |
//! | [`Config`] | `store.get(scope, key)` | accessor or lookup fails |
//! | [`PositionalArg`] | `args[index]`, `""` when out of range | never |
//! | [`StringFlag`] | the flag's value | flag undeclared or not a string |
//! | [`ExclusiveBoolFlags`] | name of the single enabled flag | two or more enabled, or lookup fails |
//! | [`Value`] | a fixed value | never |

use crate::error::{ConfigError, ResolveError};
use crate::sources::{ConfigStore, FlagSource};
use tracing::trace;

/// A single lookup in a fallback chain
pub trait Strategy: Send + Sync {
    /// Run the lookup. `Ok("")` means "no answer".
    fn evaluate(&self) -> Result<String, ResolveError>;

    /// Short label of the source this strategy reads, e.g. `env $EDITOR`.
    fn describe(&self) -> String;
}

/// Process environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    var: String,
}

/// Read environment variable `var`.
pub fn env(var: impl Into<String>) -> Env {
    Env { var: var.into() }
}

impl Strategy for Env {
    fn evaluate(&self) -> Result<String, ResolveError> {
        // Non-UTF-8 values are converted lossily rather than treated as failures.
        Ok(std::env::var_os(&self.var)
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("env ${}", self.var)
    }
}

/// Persisted config lookup through a lazily invoked store accessor
pub struct Config<A> {
    accessor: A,
    scope: String,
    key: String,
}

/// Look up `key` under `scope` in the store returned by `accessor`.
///
/// The accessor is called on every evaluation, never at construction.
pub fn config<A, S>(accessor: A, scope: impl Into<String>, key: impl Into<String>) -> Config<A>
where
    A: Fn() -> Result<S, ConfigError> + Send + Sync,
    S: ConfigStore,
{
    Config {
        accessor,
        scope: scope.into(),
        key: key.into(),
    }
}

impl<A, S> Strategy for Config<A>
where
    A: Fn() -> Result<S, ConfigError> + Send + Sync,
    S: ConfigStore,
{
    fn evaluate(&self) -> Result<String, ResolveError> {
        let store = (self.accessor)().map_err(|e| ResolveError::unavailable(self.describe(), e))?;
        store
            .get(&self.scope, &self.key)
            .map_err(|e| ResolveError::unavailable(self.describe(), e))
    }

    fn describe(&self) -> String {
        format!("config {}.{}", self.scope, self.key)
    }
}

impl<A> std::fmt::Debug for Config<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("scope", &self.scope)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Positional command argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalArg {
    args: Vec<String>,
    index: usize,
}

/// Take `args[index]`, or `""` when there are not enough arguments.
pub fn positional_arg<I, T>(args: I, index: usize) -> PositionalArg
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    PositionalArg {
        args: args.into_iter().map(Into::into).collect(),
        index,
    }
}

impl Strategy for PositionalArg {
    fn evaluate(&self) -> Result<String, ResolveError> {
        Ok(self.args.get(self.index).cloned().unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("argument #{}", self.index + 1)
    }
}

/// Single string flag
#[derive(Debug, Clone)]
pub struct StringFlag<F> {
    flags: F,
    name: String,
}

/// Read the string flag `name`.
pub fn string_flag<F: FlagSource>(flags: F, name: impl Into<String>) -> StringFlag<F> {
    StringFlag {
        flags,
        name: name.into(),
    }
}

impl<F: FlagSource> Strategy for StringFlag<F> {
    fn evaluate(&self) -> Result<String, ResolveError> {
        self.flags
            .get_string(&self.name)
            .map_err(|e| ResolveError::unavailable(self.describe(), e))
    }

    fn describe(&self) -> String {
        format!("flag --{}", self.name)
    }
}

/// Set of mutually exclusive boolean flags, each naming a distinct value
///
/// Models toggles such as `--ssh` / `--https` for one logical setting: the
/// name of the single enabled flag is the answer.
#[derive(Debug, Clone)]
pub struct ExclusiveBoolFlags<F> {
    flags: F,
    names: Vec<String>,
}

/// Answer with the name of whichever of `names` is the only one enabled.
pub fn exclusive_bool_flags<F, I, T>(flags: F, names: I) -> ExclusiveBoolFlags<F>
where
    F: FlagSource,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    ExclusiveBoolFlags {
        flags,
        names: names.into_iter().map(Into::into).collect(),
    }
}

impl<F: FlagSource> Strategy for ExclusiveBoolFlags<F> {
    fn evaluate(&self) -> Result<String, ResolveError> {
        // Every flag is checked so a conflict reports all enabled flags.
        let mut enabled = Vec::new();
        for name in &self.names {
            let on = self.flags.get_bool(name).map_err(|e| {
                ResolveError::unavailable(format!("flag --{name}"), e)
            })?;
            if on {
                enabled.push(name.clone());
            }
        }

        match enabled.len() {
            0 => Ok(String::new()),
            1 => Ok(enabled.remove(0)),
            _ => {
                trace!(enabled = ?enabled, "exclusive flags conflict");
                Err(ResolveError::Conflict { enabled })
            }
        }
    }

    fn describe(&self) -> String {
        let flags: Vec<String> = self.names.iter().map(|n| format!("--{n}")).collect();
        format!("one of {}", flags.join(" | "))
    }
}

/// Fixed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    value: String,
}

/// Always answer with `value`.
pub fn value(value: impl Into<String>) -> Value {
    Value {
        value: value.into(),
    }
}

impl Strategy for Value {
    fn evaluate(&self) -> Result<String, ResolveError> {
        Ok(self.value.clone())
    }

    fn describe(&self) -> String {
        format!("default {:?}", self.value)
    }
}

/// Closure adapted into a [`Strategy`]
pub struct FromFn<F> {
    f: F,
    label: String,
}

/// Wrap an arbitrary lookup closure, labelled `label`.
pub fn from_fn<F>(label: impl Into<String>, f: F) -> FromFn<F>
where
    F: Fn() -> Result<String, ResolveError> + Send + Sync,
{
    FromFn {
        f,
        label: label.into(),
    }
}

impl<F> Strategy for FromFn<F>
where
    F: Fn() -> Result<String, ResolveError> + Send + Sync,
{
    fn evaluate(&self) -> Result<String, ResolveError> {
        (self.f)()
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
