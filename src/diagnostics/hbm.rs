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

//! HBM controller status query.

use crate::console::Console;
use crate::error::DiagError;
use crate::random::RandomSource;
use std::io::{BufRead, Write};
use std::time::Duration;

/// AXI address of the (simulated) HBM controller status register.
pub const HBM_CONTROLLER_ADDR: u32 = 0x10000;

/// The controller reports either calibrated (`0x0001`) or idle (`0x0000`).
const STATUS_WORDS: [u16; 2] = [0x0001, 0x0000];

const DUMP_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HbmStatus {
    pub raw: u16,
}

impl HbmStatus {
    pub fn sample(rng: &mut dyn RandomSource) -> HbmStatus {
        HbmStatus {
            raw: STATUS_WORDS[rng.index(STATUS_WORDS.len())],
        }
    }

    /// Bit 0 of the status word.
    pub fn calibrated(&self) -> bool {
        self.raw & 0x1 != 0
    }

    /// The status word shifted left by 0..4 bits, masked to 16 bits.
    pub fn register_dump(&self) -> [u16; DUMP_LEN] {
        std::array::from_fn(|shift| ((u32::from(self.raw) << shift) & 0xFFFF) as u16)
    }

    pub fn state(&self) -> &'static str {
        if self.calibrated() {
            "Calibrated, OK"
        } else {
            "Idle"
        }
    }
}

pub fn run<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    rng: &mut dyn RandomSource,
) -> Result<HbmStatus, DiagError> {
    console.blank()?;
    console.line(format!(
        "[CMD] Querying HBM Controller (AXI Addr: 0x{HBM_CONTROLLER_ADDR:X})..."
    ))?;
    console.pause(Duration::from_millis(800))?;

    let status = HbmStatus::sample(rng);
    let dump = status
        .register_dump()
        .iter()
        .map(|word| format!("{word:#x}"))
        .collect::<Vec<_>>()
        .join(", ");

    console.line(format!("[AXI-RD] Register dump: [{dump}]"))?;
    console.line(format!(
        "[RECV] HBM Status Register: 0x{:04X} ({})",
        status.raw,
        status.state()
    ))?;
    if status.calibrated() {
        console.line("[INFO] HBM Memory appears to be stable.")?;
    } else {
        console.line("[WARN] HBM not initialized!")?;
    }
    Ok(status)
}
