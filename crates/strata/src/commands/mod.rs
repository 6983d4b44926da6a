//! CLI command dispatch and execution

use anyhow::{Context as _, Result};
use clap::{ArgMatches, Command, Parser, Subcommand};
use std::path::PathBuf;
use strata_core::home::get_home_dir;
use strata_core::store::default_config_path;
use strata_core::{ConfigError, ParsedFlags, TomlConfigStore};

mod editor;
mod get;
mod output;
mod protocol;

/// strata - resolve a setting from the first source that has a value
#[derive(Parser, Debug)]
#[command(
    name = "strata",
    version,
    about = "Resolve settings from flags, arguments, config files and the environment",
    long_about = "Each setting is looked up through an ordered list of sources; the first non-empty value wins"
)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/strata/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Host whose config section is consulted
    #[arg(long, global = true, default_value = "github.com")]
    host: String,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// List every source consulted and mark the one that answered
    #[arg(long, global = true)]
    explain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the editor to launch
    Editor(editor::EditorArgs),

    /// Resolve the git protocol (ssh or https)
    Protocol(protocol::ProtocolArgs),

    /// Resolve an arbitrary config key
    Get(get::GetArgs),
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub(crate) struct Context {
    /// Config file read by config strategies
    pub config_path: PathBuf,
    /// Scope key for config lookups
    pub host: String,
    pub json: bool,
    pub explain: bool,
}

impl Context {
    /// Accessor handed to config strategies; the file is read on each call.
    pub fn config_accessor(
        &self,
    ) -> impl Fn() -> Result<TomlConfigStore, ConfigError> + Send + Sync + use<> {
        let path = self.config_path.clone();
        move || TomlConfigStore::load(&path)
    }
}

impl Cli {
    /// Execute the CLI command
    ///
    /// `command` and `matches` must be what `self` was parsed from; flag
    /// strategies read the subcommand's flags through them.
    pub fn execute(self, command: &Command, matches: &ArgMatches) -> Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => default_config_path(&get_home_dir()?),
        };
        let ctx = Context {
            config_path,
            host: self.host,
            json: self.json,
            explain: self.explain,
        };

        let (name, sub_matches) = matches
            .subcommand()
            .context("no subcommand given")?;
        let sub_command = command
            .find_subcommand(name)
            .with_context(|| format!("unknown subcommand {name}"))?;
        let flags = ParsedFlags::new(sub_command, sub_matches);

        match self.command {
            Commands::Editor(args) => editor::execute(args, &flags, &ctx),
            Commands::Protocol(args) => protocol::execute(args, &flags, &ctx),
            Commands::Get(args) => get::execute(args, &ctx),
        }
    }
}
