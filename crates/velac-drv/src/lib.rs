//! Driver for the velac scripting language: CLI parsing, configuration,
//! logging, pipeline orchestration, and the real host call bridge
//! (SPEC_FULL §6). Everything the core crates treat as an external
//! collaborator (spec §1) lives here.

pub mod cli;
pub mod config;
pub mod dump;
pub mod error;
pub mod pipeline;
pub mod syscalls;

use clap::Parser as _;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Command, RunArgs};
use config::Config;
use error::DrvError;
use syscalls::StdSyscalls;

/// Entry point called by `main.rs`. Returns an `anyhow::Error` so
/// `main` can print it with full causal context and exit non-zero
/// (SPEC_FULL §7).
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let Command::Run(args) = cli.command;
    run_source(&args, &config, cli.verbose || config.verbose)
}

fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .try_init();
}

fn run_source(args: &RunArgs, config: &Config, verbose: bool) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.source)
        .map_err(|source_err| DrvError::ReadSource { path: args.source.clone(), source: source_err })?;

    let layout = args.resolve_layout(config);
    if verbose {
        tracing::debug!(?layout, "resolved memory layout");
    }

    let mem = pipeline::compile(&source, layout, args.max_tokens)?;
    let vm = pipeline::execute(mem, StdSyscalls::default())?;

    if let Some(dump_path) = &args.dump_memory {
        dump::write_dump(&vm.mem, dump_path)?;
    }

    Ok(())
}
