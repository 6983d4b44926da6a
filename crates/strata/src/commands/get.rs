//! Get command implementation

use anyhow::{Context as _, Result, bail};
use clap::Args;
use strata_core::Resolver;
use strata_core::strategy::{config, env};
use tracing::debug;

use super::Context;
use super::output::{print_resolution, print_unresolved};

/// Resolve an arbitrary config key
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Config key, e.g. `pager`
    key: String,
}

/// Environment variable consulted for `key`: `STRATA_` + upper-cased key,
/// with `-` and `.` mapped to `_`.
fn env_var_for(key: &str) -> String {
    let suffix: String = key
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    format!("STRATA_{suffix}")
}

/// Register config then environment for `key`.
pub(crate) fn resolver(key: &str, ctx: &Context) -> Resolver<'static> {
    Resolver::new()
        .with(key, config(ctx.config_accessor(), ctx.host.clone(), key))
        .with(key, env(env_var_for(key)))
}

/// Execute the get command
pub fn execute(args: GetArgs, ctx: &Context) -> Result<()> {
    let key = args.key.as_str();
    let resolver = resolver(key, ctx);
    debug!(?resolver, "resolving {key}");

    match resolver.resolve_traced(key) {
        Ok(resolution) => print_resolution(ctx, &resolver, key, &resolution),
        Err(e) => {
            print_unresolved(ctx, &resolver, key);
            if e.is_exhausted() {
                bail!("no value for {key}");
            }
            Err(e).with_context(|| format!("failed to resolve {key}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_for() {
        assert_eq!(env_var_for("pager"), "STRATA_PAGER");
        assert_eq!(env_var_for("git-protocol"), "STRATA_GIT_PROTOCOL");
        assert_eq!(env_var_for("http.unix_socket"), "STRATA_HTTP_UNIX_SOCKET");
    }
}
