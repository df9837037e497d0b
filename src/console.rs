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

//! Terminal plumbing shared by the sequencer, the menu loop and the diagnostics.
//!
//! [`Console`] owns the input and output streams and the [`Pacing`] policy. Production code
//! wraps stdin/stdout in real time; tests wrap a byte cursor and a `Vec<u8>` with
//! [`Pacing::Instant`] and read the transcript back with [`Console::into_output`].

use crate::error::DiagError;
use crate::random::RandomSource;
use log::trace;
use std::fmt::Display;
use std::io::{self, BufRead, Stdout, StdinLock, Write};
use std::thread;
use std::time::Duration;

/// ANSI sequence that clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Whether simulated waits really block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    RealTime,
    Instant,
}

impl Pacing {
    pub fn pause(self, duration: Duration) {
        if self == Pacing::RealTime && !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

pub struct Console<I, O> {
    input: I,
    output: O,
    pacing: Pacing,
    clear_screen: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console on the process' stdin and stdout.
    pub fn stdio(pacing: Pacing, clear_screen: bool) -> Self {
        Console::new(io::stdin().lock(), io::stdout(), pacing).with_clear_screen(clear_screen)
    }
}

impl<I: BufRead, O: Write> Console<I, O> {
    /// Screen clearing starts disabled.
    pub fn new(input: I, output: O, pacing: Pacing) -> Self {
        Console {
            input,
            output,
            pacing,
            clear_screen: false,
        }
    }

    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Write `text` followed by a newline.
    pub fn line(&mut self, text: impl Display) -> Result<(), DiagError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<(), DiagError> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Return the cursor to the start of the line and write `text` over it.
    pub fn overwrite(&mut self, text: impl Display) -> Result<(), DiagError> {
        write!(self.output, "\r{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Flush pending output, then wait for `duration` as the pacing allows.
    pub fn pause(&mut self, duration: Duration) -> Result<(), DiagError> {
        self.output.flush()?;
        self.pacing.pause(duration);
        Ok(())
    }

    /// Wait a random time in `low..high` seconds.
    pub fn pause_between(
        &mut self,
        rng: &mut dyn RandomSource,
        low: f64,
        high: f64,
    ) -> Result<(), DiagError> {
        let secs = rng.real_in(low, high);
        self.pause(Duration::from_secs_f64(secs))
    }

    /// Write `text` without a newline and read one line of input.
    ///
    /// # Returns: `Result<Option<String>, DiagError>`
    /// * `Ok(Some(String))` - The line, without its line terminator
    /// * `Ok(None)` - Input is closed
    pub fn prompt(&mut self, text: impl Display) -> Result<Option<String>, DiagError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            trace!("Input closed");
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn clear_screen(&mut self) -> Result<(), DiagError> {
        if self.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
            self.output.flush()?;
        }
        Ok(())
    }

    pub fn into_output(self) -> O {
        self.output
    }
}
