//! Command-line surface (SPEC_FULL §6), modeled on `faxt::Cli`/`Commands`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use velac_gen::MemoryLayout;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "velac")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lexer, parser, analyzer, emitter, linker, and VM for the velac language")]
pub struct Cli {
    /// Enable debug-level logging.
    #[arg(short, long, global = true, env = "VELAC_VERBOSE")]
    pub verbose: bool,

    /// Path to a `velac.toml` configuration file, overriding the default
    /// search order (SPEC_FULL §6).
    #[arg(short, long, global = true, env = "VELAC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile and run a source file.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Source file to compile and run.
    pub source: PathBuf,

    /// Write a decimal-per-line dump of the final linear memory to this
    /// path after the VM halts (spec §6 debug side-channel).
    #[arg(long)]
    pub dump_memory: Option<PathBuf>,

    /// Override the global-slot region size (default `1<<8`).
    #[arg(long)]
    pub glob_size: Option<usize>,

    /// Override the per-call stack slack (default `1<<10`).
    #[arg(long)]
    pub stack_size: Option<usize>,

    /// Override the total linear memory size (default `1<<20`).
    #[arg(long)]
    pub mem_size: Option<usize>,

    /// Maximum number of tokens the lexer will accept before erroring
    /// (spec §5, §7a "token array exhausted").
    #[arg(long, default_value_t = 1 << 20)]
    pub max_tokens: usize,
}

impl RunArgs {
    /// CLI flags win over `velac.toml`, which wins over the built-in
    /// default (SPEC_FULL §6).
    pub fn resolve_layout(&self, config: &Config) -> MemoryLayout {
        let default = MemoryLayout::default();
        MemoryLayout {
            glob_sz: self.glob_size.or(config.memory.glob_size).unwrap_or(default.glob_sz),
            stk_sz: self.stack_size.or(config.memory.stack_size).unwrap_or(default.stk_sz),
            mem_sz: self.mem_size.or(config.memory.mem_size).unwrap_or(default.mem_sz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_a_source_path() {
        let cli = Cli::parse_from(["velac", "run", "prog.vl"]);
        match cli.command {
            Command::Run(args) => assert_eq!(args.source, PathBuf::from("prog.vl")),
        }
    }

    #[test]
    fn cli_overrides_take_precedence_over_config() {
        let cli = Cli::parse_from(["velac", "run", "prog.vl", "--glob-size", "512"]);
        let Command::Run(args) = cli.command;
        let mut config = Config::default();
        config.memory.glob_size = Some(128);
        let layout = args.resolve_layout(&config);
        assert_eq!(layout.glob_sz, 512);
    }

    #[test]
    fn config_fills_in_when_no_cli_override_is_given() {
        let cli = Cli::parse_from(["velac", "run", "prog.vl"]);
        let Command::Run(args) = cli.command;
        let mut config = Config::default();
        config.memory.stack_size = Some(2048);
        let layout = args.resolve_layout(&config);
        assert_eq!(layout.stk_sz, 2048);
        assert_eq!(layout.glob_sz, MemoryLayout::default().glob_sz);
    }
}
