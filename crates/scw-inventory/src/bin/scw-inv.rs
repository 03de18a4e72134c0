//! scw-inv - Ansible dynamic inventory for Scaleway.
//!
//! Implements the inventory script protocol: `--list` prints every tag group,
//! `--host <name>` prints the variables of one host. JSON goes to stdout,
//! logs and errors to stderr.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use scw_inventory::{list_inventory, output, resolve_host, InventoryConfig};

/// Prefix of every message written to stderr.
const MSG_PREFIX: &str = "scw-inv:";

/// One-line usage shown on argument errors.
const USAGE: &str = "usage: scw-inv --list | --host <hostname>";

/// scw-inv - Ansible dynamic inventory for Scaleway servers.
///
/// Credentials are read from `SCALEWAY_ORGANIZATION` and `SCALEWAY_TOKEN`.
#[derive(Parser)]
#[command(name = "scw-inv", version)]
#[command(group(ArgGroup::new("mode").required(true).args(["list", "host"])))]
struct Cli {
    /// Print all servers grouped by tag.
    #[arg(long)]
    list: bool,

    /// Print the variables of a single host.
    #[arg(long, value_name = "HOSTNAME", value_parser = NonEmptyStringValueParser::new())]
    host: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let host_given = std::env::args().any(|a| is_host_flag(&a));
            if e.kind() == ErrorKind::InvalidValue && host_given {
                eprintln!("{MSG_PREFIX} hostname is required (--host <hostname>)");
            } else {
                eprintln!("{USAGE}");
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging; stdout is reserved for JSON
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{MSG_PREFIX} {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Whether `arg` is the `--host` flag, with or without an inline value.
fn is_host_flag(arg: &str) -> bool {
    arg == "--host" || arg.starts_with("--host=")
}

async fn run(cli: &Cli) -> Result<()> {
    let config = InventoryConfig::from_env()?;
    debug!(?config, "Loaded configuration");

    let directory = config
        .directory()
        .context("failed to create scaleway API instance")?;

    let written = if let Some(name) = &cli.host {
        let vars = resolve_host(name, &config.name_pattern, &directory)
            .await
            .with_context(|| format!("failed to get host variables for '{name}'"))?;
        output::write_json(&vars, io::stdout().lock())
    } else {
        let groups = list_inventory(&directory, &config.name_pattern)
            .await
            .context("failed to get servers")?;
        output::write_json(&groups, io::stdout().lock())
    };

    written.context("failed to marshal the dynamic inventory")
}
