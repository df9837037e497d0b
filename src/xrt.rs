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

//! The simulated XRT command line tool.
//!
//! Programming steps never touch hardware: [`simulate`] prints the command that would have
//! been run and draws its outcome from the random source. The only real process the console
//! ever starts is `xbutil examine` in [`examine`], used to fetch the live device identity,
//! and only when the `live-query` feature is enabled.

use crate::config::XBUTIL;
use crate::console::Console;
use crate::error::DiagError;
use crate::random::RandomSource;
use log::{debug, trace};
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XrtCommand {
    Init { device: String },
    Validate { bitstream: PathBuf },
    Program { bitstream: PathBuf, device: String },
    Verify { bitstream: PathBuf },
    Examine,
}

impl fmt::Display for XrtCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XrtCommand::Init { device } => write!(f, "{XBUTIL} --device {device} --init"),
            XrtCommand::Validate { bitstream } => {
                write!(f, "{XBUTIL} --validate --bitstream {}", bitstream.display())
            }
            XrtCommand::Program { bitstream, device } => write!(
                f,
                "{XBUTIL} --program --bitstream {} --device {device}",
                bitstream.display()
            ),
            XrtCommand::Verify { bitstream } => {
                write!(f, "{XBUTIL} --verify --bitstream {}", bitstream.display())
            }
            XrtCommand::Examine => write!(f, "{XBUTIL} examine"),
        }
    }
}

/// Pretend to run `command`.
///
/// Waits 0.5 to 1.5 seconds, flips a coin, and prints the command followed by either
/// `[SUCCESS] <success>` or `[ERROR] <failure>`.
///
/// # Returns: `Result<bool, DiagError>`
/// * `Ok(true)` / `Ok(false)` - The simulated outcome
/// * `Err(DiagError::Console)` - Writing to the terminal failed
pub fn simulate<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    rng: &mut dyn RandomSource,
    command: &XrtCommand,
    success: &str,
    failure: &str,
) -> Result<bool, DiagError> {
    console.pause_between(rng, 0.5, 1.5)?;
    let passed = rng.coin_flip();
    debug!("Simulated `{command}`: passed={passed}");
    console.line(format!("[SIM] {command}"))?;
    if passed {
        console.line(format!("[SUCCESS] {success}"))?;
    } else {
        console.line(format!("[ERROR] {failure}"))?;
    }
    Ok(passed)
}

/// Run `<xbutil> examine` and return its standard output.
///
/// # Returns: `Result<String, DiagError>`
/// * `Ok(String)` - The tool's stdout
/// * `Err(DiagError::Tool)` - The tool could not be started or exited unsuccessfully
#[cfg(feature = "live-query")]
pub fn examine(xbutil: &Path) -> Result<String, DiagError> {
    use std::process::Command;

    trace!("Running `{}` via {xbutil:?}", XrtCommand::Examine);
    let output = Command::new(xbutil)
        .arg("examine")
        .output()
        .map_err(|e| DiagError::Tool {
            tool: xbutil.to_owned(),
            reason: e.to_string(),
        })?;
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(DiagError::Tool {
            tool: xbutil.to_owned(),
            reason: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        })
    }
}

#[cfg(not(feature = "live-query"))]
pub fn examine(xbutil: &Path) -> Result<String, DiagError> {
    trace!("Skipping `{}`: built without live-query", XrtCommand::Examine);
    Err(DiagError::Tool {
        tool: xbutil.to_owned(),
        reason: "built without the live-query feature".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Pacing;
    use crate::random::Scripted;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case::init(XrtCommand::Init { device: "dev0".into() }, "xbutil --device dev0 --init")]
    #[case::validate(
        XrtCommand::Validate { bitstream: "bit_file/top.bit".into() },
        "xbutil --validate --bitstream bit_file/top.bit"
    )]
    #[case::program(
        XrtCommand::Program { bitstream: "top.bit".into(), device: "dev0".into() },
        "xbutil --program --bitstream top.bit --device dev0"
    )]
    #[case::verify(
        XrtCommand::Verify { bitstream: "top.bit".into() },
        "xbutil --verify --bitstream top.bit"
    )]
    #[case::examine(XrtCommand::Examine, "xbutil examine")]
    fn test_command_display(#[case] command: XrtCommand, #[case] expected: &str) {
        assert_eq!(command.to_string(), expected);
    }

    #[rstest]
    #[case::pass(true, "[SUCCESS] all good")]
    #[case::fail(false, "[ERROR] it broke")]
    fn test_simulate_prints_outcome(#[case] outcome: bool, #[case] expected: &str) {
        let mut console = Console::new(Cursor::new(Vec::<u8>::new()), Vec::new(), Pacing::Instant);
        let mut rng = Scripted::always(outcome, 3);
        let command = XrtCommand::Init {
            device: "dev0".into(),
        };

        let passed = simulate(&mut console, &mut rng, &command, "all good", "it broke").unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();

        assert_eq!(passed, outcome);
        assert_eq!(out, format!("[SIM] xbutil --device dev0 --init\n{expected}\n"));
    }

    #[test]
    fn test_examine_missing_tool_is_tool_error() {
        let result = examine(Path::new("/nonexistent/xrt/bin/xbutil"));
        assert!(matches!(result, Err(DiagError::Tool { .. })), "{result:?}");
    }
}
