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

//! Test data transfer to the processing kernel.

use crate::checksum::additive32;
use crate::console::Console;
use crate::error::DiagError;
use crate::random::RandomSource;
use std::io::{BufRead, Write};
use std::time::Duration;

pub const BUFFER_LEN: usize = 4096;
pub const NOMINAL_LATENCY_US: u32 = 150;
pub const LATENCY_JITTER_US: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferResult {
    pub checksum: u32,
    pub latency_us: u32,
}

impl TransferResult {
    pub fn sample(rng: &mut dyn RandomSource) -> TransferResult {
        let mut buffer = vec![0u8; BUFFER_LEN];
        rng.fill(&mut buffer);
        let jitter = rng.int_in(-LATENCY_JITTER_US, LATENCY_JITTER_US);
        TransferResult {
            checksum: additive32(&buffer),
            latency_us: NOMINAL_LATENCY_US.saturating_add_signed(jitter),
        }
    }
}

pub fn run<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    rng: &mut dyn RandomSource,
) -> Result<TransferResult, DiagError> {
    console.blank()?;
    console.line("[CMD] Allocating buffer and sending 4KB data to Kernel_0...")?;
    console.pause(Duration::from_millis(500))?;

    let result = TransferResult::sample(rng);
    console.pause(Duration::from_secs(1))?;

    console.line(format!(
        "[INFO] Data transfer complete. Buffer checksum=0x{:08X}",
        result.checksum
    ))?;
    console.line(format!(
        "[RECV] Kernel_0 returned status OK. Latency: {} us.",
        result.latency_us
    ))?;
    Ok(result)
}
