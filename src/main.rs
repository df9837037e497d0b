// This file is part of u50diag, a simulated live diagnostics console for Alveo U50 accelerator cards.
//
// Copyright 2025 Canonical Ltd.
//
// SPDX-License-Identifier: GPL-3.0-only
//
// u50diag is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License version 3, as published by the Free Software Foundation.
//
// u50diag is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranties of MERCHANTABILITY, SATISFACTORY QUALITY, or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with this program.  If not, see http://www.gnu.org/licenses/.

//! u50diag - command line entry point.
//!
//! Without a subcommand the console programs the configured bitstream and then serves the
//! interactive diagnostics menu. Subcommands run either half on its own.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (`trace`, `debug`, `info`, `warn`, `error`
//!   or `off`). Defaults to `warn` so log lines do not interleave with the console.
//!   Logs are written to stderr.
//!
//! # Exit codes
//!
//! - `0` - The menu was quit normally, or the subcommand completed
//! - `1` - Missing or invalid configuration, no bitstream, or a failed programming step

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error};
use std::path::PathBuf;
use std::process::ExitCode;
use u50diag::config::CONFIG_FILE;
use u50diag::config::prog_config::ProgConfig;
use u50diag::config::settings::Settings;
use u50diag::console::{Console, Pacing};
use u50diag::device_info::DeviceInfo;
use u50diag::diagnostics::Diagnostic;
use u50diag::error::DiagError;
use u50diag::menu::MenuLoop;
use u50diag::random::{RandomSource, Scripted, StdRandom};
use u50diag::sequencer::StartupSequence;

#[derive(Parser, Debug)]
#[command(name = "u50diag")]
#[command(bin_name = "u50diag")]
#[command(version, about = "Simulated live diagnostics console for Alveo U50 cards")]
struct Cli {
    /// Programming config file with `KEY=value` lines
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,
    #[arg(
        long = "bitstream-dir",
        global = true,
        help = r#"Directory scanned for *.bit files. The most recently modified one is programmed.
Overrides BIT_DIR from the config file.
        "#
    )]
    bitstream_dir: Option<PathBuf>,
    /// Directory holding the XRT tools. Overrides XRT_BIN_PATH from the config file
    #[arg(long = "xrt-bin-dir", global = true)]
    xrt_bin_dir: Option<PathBuf>,
    /// Seed the random source for a reproducible session
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Make every simulated tool invocation succeed
    #[arg(long = "always-pass", global = true)]
    always_pass: bool,
    /// Skip all simulated waits
    #[arg(long, global = true)]
    fast: bool,
    /// Do not clear the screen between menu pages
    #[arg(long = "no-clear", global = true)]
    no_clear: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Program the bitstream, then open the diagnostics menu (default)
    Run,
    /// Program the bitstream and exit
    Program,
    /// Run a single diagnostic without the menu
    Diag {
        #[arg(value_enum)]
        name: DiagnosticArg,
    },
    /// Print the device identity header and exit
    Info,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DiagnosticArg {
    Hbm,
    Pcie,
    Temp,
    Send,
}

impl From<DiagnosticArg> for Diagnostic {
    fn from(value: DiagnosticArg) -> Self {
        match value {
            DiagnosticArg::Hbm => Diagnostic::HbmStatus,
            DiagnosticArg::Pcie => Diagnostic::PcieLoopback,
            DiagnosticArg::Temp => Diagnostic::Temperature,
            DiagnosticArg::Send => Diagnostic::SendData,
        }
    }
}

/// Command line overrides first, then the config file.
fn load_settings(cli: &Cli) -> Result<Settings, DiagError> {
    let overrides = ProgConfig {
        bit_dir: cli.bitstream_dir.clone(),
        xrt_bin_path: cli.xrt_bin_dir.clone(),
        ..ProgConfig::default()
    };
    let file = ProgConfig::from_file(&cli.config)?;
    Settings::resolve(overrides.merge(file))
}

fn random_source(cli: &Cli) -> Box<dyn RandomSource> {
    match (cli.always_pass, cli.seed) {
        (true, seed) => Box::new(Scripted::always(true, seed.unwrap_or_else(rand::random))),
        (false, Some(seed)) => Box::new(StdRandom::seeded(seed)),
        (false, None) => Box::new(StdRandom::from_entropy()),
    }
}

fn run(cli: &Cli) -> Result<(), DiagError> {
    let pacing = if cli.fast {
        Pacing::Instant
    } else {
        Pacing::RealTime
    };
    let mut console = Console::stdio(pacing, !cli.no_clear);
    let mut rng = random_source(cli);

    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Run => {
            let settings = load_settings(cli)?;
            console.clear_screen()?;
            StartupSequence::standard(&settings).run(&mut console, rng.as_mut())?;
            let device = DeviceInfo::query(&settings.xbutil(), DeviceInfo::from_settings(&settings));
            MenuLoop::new(&device).run(&mut console, rng.as_mut())?;
        }
        Commands::Program => {
            let settings = load_settings(cli)?;
            StartupSequence::standard(&settings).run(&mut console, rng.as_mut())?;
        }
        Commands::Diag { name } => {
            Diagnostic::from(*name).run(&mut console, rng.as_mut())?;
        }
        Commands::Info => {
            let settings = load_settings(cli)?;
            let device = DeviceInfo::query(&settings.xbutil(), DeviceInfo::from_settings(&settings));
            console.line(&device)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    debug!("parsed cli command with {cli:?}");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["u50diag"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("./prog_config.txt"));
        assert!(cli.command.is_none());
        assert!(!cli.fast && !cli.always_pass && !cli.no_clear);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["u50diag", "diag", "temp", "--fast", "--seed", "9"]).unwrap();
        assert!(cli.fast);
        assert_eq!(cli.seed, Some(9));
        assert!(matches!(
            cli.command,
            Some(Commands::Diag {
                name: DiagnosticArg::Temp
            })
        ));
    }
}
