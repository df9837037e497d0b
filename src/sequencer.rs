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

//! The one-shot bitstream programming sequence run at startup.
//!
//! The sequence is a fixed, ordered list of [`Step`]s. Each step simulates an `xbutil`
//! invocation whose outcome is a coin flip. The first failing step stops the sequence and
//! is returned as [`DiagError::Step`]; later steps never run and nothing is retried.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use u50diag::config::settings::Settings;
//! # use u50diag::console::{Console, Pacing};
//! # use u50diag::random::StdRandom;
//! # use u50diag::sequencer::StartupSequence;
//! # fn example(settings: &Settings) -> Result<(), u50diag::error::DiagError> {
//! let mut console = Console::stdio(Pacing::RealTime, true);
//! StartupSequence::standard(settings).run(&mut console, &mut StdRandom::from_entropy())?;
//! # Ok(())
//! # }
//! ```

use crate::config::PROGRESS_BAR_WIDTH;
use crate::config::settings::Settings;
use crate::console::Console;
use crate::error::DiagError;
use crate::progress::progress_bar;
use crate::random::RandomSource;
use crate::xrt::{self, XrtCommand};
use log::{error, info, trace};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

const BANNER_RULE: &str = "==========================================================";
const TRANSFER_MESSAGE: &str = "Transferring bitstream via xbutil...";

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub label: String,
    pub command: XrtCommand,
    pub success: &'static str,
    pub failure: &'static str,
    /// Pause after the step succeeds.
    pub settle: Duration,
    /// Length of the transfer progress bar drawn after the step succeeds, if any.
    pub transfer: Option<Duration>,
    /// Extra error line printed after `failure` when the step fails.
    pub abort_note: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartupSequence {
    artifact: PathBuf,
    steps: Vec<Step>,
}

impl StartupSequence {
    pub fn new(artifact: PathBuf, steps: Vec<Step>) -> StartupSequence {
        StartupSequence { artifact, steps }
    }

    /// The five-step Alveo U50 programming flow for `settings`.
    pub fn standard(settings: &Settings) -> StartupSequence {
        let device = settings.target_device.clone();
        let bitstream = settings.bitstream.clone();
        let init = XrtCommand::Init {
            device: device.clone(),
        };
        let steps = vec![
            Step {
                label: "Verifying XRT environment...".to_string(),
                command: init.clone(),
                success: "Device initialized successfully.",
                failure: "Initialization failed. Check JTAG connection.",
                settle: Duration::from_secs(2),
                transfer: None,
                abort_note: None,
            },
            Step {
                label: format!(
                    "Verifying build output directory '{}'...",
                    settings.output_dir().display()
                ),
                command: XrtCommand::Validate {
                    bitstream: bitstream.clone(),
                },
                success: "Bitstream integrity check passed.",
                failure: "Validation failed. Check bitstream syntax.",
                settle: Duration::from_secs(1),
                transfer: None,
                abort_note: None,
            },
            Step {
                label: "Initializing device with xbutil...".to_string(),
                command: init,
                success: "Device initialized successfully.",
                failure: "Initialization failed. Check JTAG connection.",
                settle: Duration::from_secs(2),
                transfer: None,
                abort_note: None,
            },
            Step {
                label: "Programming bitstream to Alveo U50...".to_string(),
                command: XrtCommand::Program {
                    bitstream: bitstream.clone(),
                    device,
                },
                success: "Programming command sent to hardware.",
                failure: "Programming failed. Verify device ID.",
                settle: Duration::from_secs(1),
                transfer: Some(settings.program_duration),
                abort_note: None,
            },
            Step {
                label: "Verifying programming with xbutil...".to_string(),
                command: XrtCommand::Verify { bitstream },
                success: "Verification successful. Device configured.",
                failure: "Verification failed. Re-run programming.",
                settle: Duration::ZERO,
                transfer: None,
                abort_note: Some("Programming verification failed."),
            },
        ];
        StartupSequence::new(settings.bitstream.clone(), steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// # Returns: `Result<(), DiagError>`
    /// * `Ok(())` - Every step succeeded
    /// * `Err(DiagError::Bitstream)` - The artifact is missing; no step was run
    /// * `Err(DiagError::Step)` - The first step that failed
    /// * `Err(DiagError::Console)` - Writing to the terminal failed
    pub fn run<I: BufRead, O: Write>(
        &self,
        console: &mut Console<I, O>,
        rng: &mut dyn RandomSource,
    ) -> Result<(), DiagError> {
        console.line(BANNER_RULE)?;
        console.line("  Alveo U50 Bitstream Programming (Xilinx Tools)")?;
        console.line(BANNER_RULE)?;

        if !self.artifact.is_file() {
            let message = format!(
                "Bitstream '{}' not found. Generate with Vivado first.",
                self.artifact.display()
            );
            console.line(format!("[ERROR] {message}"))?;
            return Err(DiagError::Bitstream(message));
        }

        let total = self.steps.len();
        for (index, step) in self.steps.iter().enumerate().map(|(i, s)| (i + 1, s)) {
            console.blank()?;
            console.line(format!("[STEP {index}/{total}] {}", step.label))?;
            trace!("Running step {index}/{total}: {}", step.command);
            if !xrt::simulate(console, rng, &step.command, step.success, step.failure)? {
                error!("Step {index}/{total} failed: {}", step.failure);
                if let Some(note) = step.abort_note {
                    console.line(format!("[ERROR] {note}"))?;
                }
                return Err(DiagError::Step {
                    index,
                    total,
                    label: step.label.clone(),
                    message: step.failure.to_string(),
                });
            }
            if let Some(duration) = step.transfer {
                progress_bar(console, TRANSFER_MESSAGE, duration, PROGRESS_BAR_WIDTH)?;
            }
            console.pause(step.settle)?;
        }

        console.blank()?;
        console.line(BANNER_RULE)?;
        console.line("  Programming Completed Successfully.")?;
        console.line(BANNER_RULE)?;
        info!("Programmed {:?} in {total} steps", self.artifact);
        Ok(())
    }
}
