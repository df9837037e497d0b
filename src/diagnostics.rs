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

//! The four live diagnostics offered by the menu.
//!
//! Each diagnostic is split in two: a sampling function that draws a plain reading from
//! the [`RandomSource`], and a `run` function that paces the simulated bus traffic and
//! prints the reading. None of them has a failure path of its own; only writing to the
//! terminal can fail.

pub mod hbm;
pub mod pcie;
pub mod thermal;
pub mod transfer;

use crate::console::Console;
use crate::error::DiagError;
use crate::random::RandomSource;
use log::info;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    HbmStatus,
    PcieLoopback,
    Temperature,
    SendData,
}

impl Diagnostic {
    pub const ALL: [Diagnostic; 4] = [
        Diagnostic::HbmStatus,
        Diagnostic::PcieLoopback,
        Diagnostic::Temperature,
        Diagnostic::SendData,
    ];

    /// Menu text for this diagnostic.
    pub fn title(self) -> &'static str {
        match self {
            Diagnostic::HbmStatus => "Check HBM (High Bandwidth Memory) Status",
            Diagnostic::PcieLoopback => "Run PCIe Link Self-Test",
            Diagnostic::Temperature => "Read On-Chip Temperature Sensors",
            Diagnostic::SendData => "Send test data to processing kernel",
        }
    }

    pub fn run<I: BufRead, O: Write>(
        self,
        console: &mut Console<I, O>,
        rng: &mut dyn RandomSource,
    ) -> Result<(), DiagError> {
        info!("Running diagnostic {self:?}");
        match self {
            Diagnostic::HbmStatus => hbm::run(console, rng).map(drop),
            Diagnostic::PcieLoopback => pcie::run(console, rng).map(drop),
            Diagnostic::Temperature => thermal::run(console, rng).map(drop),
            Diagnostic::SendData => transfer::run(console, rng).map(drop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Pacing;
    use crate::random::StdRandom;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case::hbm(Diagnostic::HbmStatus, &["Calibrated", "Idle"])]
    #[case::pcie(Diagnostic::PcieLoopback, &["PASS", "FAIL"])]
    #[case::temperature(Diagnostic::Temperature, &["OK"])]
    #[case::send(Diagnostic::SendData, &["OK"])]
    fn test_every_diagnostic_reports_a_status(
        #[case] diagnostic: Diagnostic,
        #[case] keywords: &[&str],
        #[values(0, 1, 2, 3, 42, 1234)] seed: u64,
    ) {
        let mut console = Console::new(Cursor::new(Vec::<u8>::new()), Vec::new(), Pacing::Instant);
        let mut rng = StdRandom::seeded(seed);

        diagnostic.run(&mut console, &mut rng).unwrap();

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(
            out.lines()
                .any(|line| keywords.iter().any(|keyword| line.contains(keyword))),
            "no status keyword in:\n{out}"
        );
    }
}
