//! Protocol command implementation

use anyhow::{Context as _, Result};
use clap::Args;
use strata_core::{ParsedFlags, Resolver};
use strata_core::strategy::{config, env, exclusive_bool_flags, string_flag, value};
use tracing::debug;

use super::Context;
use super::output::{print_resolution, print_unresolved};

const SETTING: &str = "protocol";

/// Resolve the git protocol
#[derive(Args, Debug)]
pub struct ProtocolArgs {
    /// Protocol name
    #[arg(long, value_name = "PROTOCOL")]
    protocol: Option<String>,

    /// Use ssh
    #[arg(long)]
    ssh: bool,

    /// Use https
    #[arg(long)]
    https: bool,
}

/// Register the protocol sources in priority order.
///
/// `--protocol`, one of `--ssh` / `--https`, config `git_protocol`,
/// `$STRATA_GIT_PROTOCOL`, then `https`.
pub(crate) fn resolver<'a>(flags: &'a ParsedFlags<'_>, ctx: &Context) -> Resolver<'a> {
    Resolver::new()
        .with(SETTING, string_flag(flags, "protocol"))
        .with(SETTING, exclusive_bool_flags(flags, ["ssh", "https"]))
        .with(SETTING, config(ctx.config_accessor(), ctx.host.clone(), "git_protocol"))
        .with(SETTING, env("STRATA_GIT_PROTOCOL"))
        .with(SETTING, value("https"))
}

/// Execute the protocol command
pub fn execute(args: ProtocolArgs, flags: &ParsedFlags<'_>, ctx: &Context) -> Result<()> {
    debug!(
        protocol = ?args.protocol,
        ssh = args.ssh,
        https = args.https,
        "protocol arguments"
    );
    let resolver = resolver(flags, ctx);
    debug!(?resolver, "resolving {SETTING}");

    match resolver.resolve_traced(SETTING) {
        Ok(resolution) => print_resolution(ctx, &resolver, SETTING, &resolution),
        Err(e) => {
            print_unresolved(ctx, &resolver, SETTING);
            Err(e).with_context(|| format!("failed to resolve {SETTING}"))
        }
    }
}
