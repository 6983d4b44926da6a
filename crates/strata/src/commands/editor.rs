//! Editor command implementation

use anyhow::{Context as _, Result};
use clap::Args;
use strata_core::{ParsedFlags, Resolver};
use strata_core::strategy::{config, env, positional_arg, string_flag, value};
use tracing::debug;

use super::Context;
use super::output::{print_resolution, print_unresolved};

const SETTING: &str = "editor";

/// Resolve the editor to launch
#[derive(Args, Debug)]
pub struct EditorArgs {
    /// Editor command, same as --editor but lower priority
    #[arg(value_name = "EDITOR")]
    command: Option<String>,

    /// Editor command
    #[arg(long, value_name = "EDITOR")]
    editor: Option<String>,
}

/// Register the editor sources in priority order.
///
/// `--editor`, positional argument, config `editor`, `$STRATA_EDITOR`,
/// `$VISUAL`, `$EDITOR`, then `nano`.
pub(crate) fn resolver<'a>(
    args: EditorArgs,
    flags: &'a ParsedFlags<'_>,
    ctx: &Context,
) -> Resolver<'a> {
    Resolver::new()
        .with(SETTING, string_flag(flags, "editor"))
        .with(SETTING, positional_arg(args.command, 0))
        .with(SETTING, config(ctx.config_accessor(), ctx.host.clone(), "editor"))
        .with(SETTING, env("STRATA_EDITOR"))
        .with(SETTING, env("VISUAL"))
        .with(SETTING, env("EDITOR"))
        .with(SETTING, value("nano"))
}

/// Execute the editor command
pub fn execute(args: EditorArgs, flags: &ParsedFlags<'_>, ctx: &Context) -> Result<()> {
    debug!(flag = ?args.editor, positional = ?args.command, "editor arguments");
    let resolver = resolver(args, flags, ctx);
    debug!(?resolver, "resolving {SETTING}");

    match resolver.resolve_traced(SETTING) {
        Ok(resolution) => print_resolution(ctx, &resolver, SETTING, &resolution),
        Err(e) => {
            print_unresolved(ctx, &resolver, SETTING);
            Err(e).with_context(|| format!("failed to resolve {SETTING}"))
        }
    }
}
