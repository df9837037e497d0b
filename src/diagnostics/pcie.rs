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

//! PCIe loopback self-test.
//!
//! A random payload is checksummed, sent through the loopback link and checksummed again
//! on the way back. The default link returns an exact copy, so the test can only fail when
//! a caller supplies a link that corrupts the payload.

use crate::checksum::additive16;
use crate::console::Console;
use crate::error::DiagError;
use crate::progress::percent_counter;
use crate::random::RandomSource;
use log::{debug, warn};
use std::io::{BufRead, Write};
use std::time::Duration;

pub const PAYLOAD_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopbackResult {
    pub tx_checksum: u16,
    pub rx_checksum: u16,
}

impl LoopbackResult {
    pub fn passed(&self) -> bool {
        self.tx_checksum == self.rx_checksum
    }
}

/// The simulated link: what goes out comes back unchanged.
pub fn loopback(payload: &[u8]) -> Vec<u8> {
    payload.to_vec()
}

/// Checksum `payload`, pass it through `link` and checksum what comes back.
pub fn exchange(payload: &[u8], link: impl FnOnce(&[u8]) -> Vec<u8>) -> LoopbackResult {
    let tx_checksum = additive16(payload);
    let received = link(payload);
    LoopbackResult {
        tx_checksum,
        rx_checksum: additive16(&received),
    }
}

pub fn run<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    rng: &mut dyn RandomSource,
) -> Result<LoopbackResult, DiagError> {
    run_with_link(console, rng, loopback)
}

/// Run the self-test over a custom `link`.
pub fn run_with_link<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    rng: &mut dyn RandomSource,
    link: impl FnOnce(&[u8]) -> Vec<u8>,
) -> Result<LoopbackResult, DiagError> {
    console.blank()?;
    console.line("[CMD] Initiating PCIe Gen3 x16 loopback test...")?;
    console.pause(Duration::from_millis(500))?;

    let mut payload = [0u8; PAYLOAD_LEN];
    rng.fill(&mut payload);

    console.line("[INFO] Sending 1MB test payload...")?;
    percent_counter(console, 10, Duration::from_millis(200))?;
    let result = exchange(&payload, link);
    debug!("PCIe loopback checksums: {result:?}");

    console.blank()?;
    console.line("[INFO] Payload received, verifying...")?;
    console.pause(Duration::from_millis(500))?;
    if result.passed() {
        console.line(format!(
            "[RECV] PCIe Link Test: PASS (Integrity OK, checksum=0x{:04X})",
            result.rx_checksum
        ))?;
    } else {
        warn!("PCIe loopback mismatch: {result:?}");
        console.line("[FAIL] Data mismatch detected in loopback test.")?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Pacing;
    use crate::random::StdRandom;
    use std::io::Cursor;

    fn flip_first_byte(payload: &[u8]) -> Vec<u8> {
        let mut corrupted = payload.to_vec();
        corrupted[0] = corrupted[0].wrapping_add(1);
        corrupted
    }

    #[test]
    fn test_exchange_untouched_payload_passes() {
        for seed in 0..32 {
            let mut payload = [0u8; PAYLOAD_LEN];
            StdRandom::seeded(seed).fill(&mut payload);
            let result = exchange(&payload, loopback);
            assert!(result.passed(), "seed {seed}: {result:?}");
            assert_eq!(result.tx_checksum, additive16(&payload));
        }
    }

    #[test]
    fn test_exchange_corrupted_payload_fails() {
        let payload = [0x5Au8; PAYLOAD_LEN];
        let result = exchange(&payload, flip_first_byte);
        assert!(!result.passed());
        assert_eq!(result.rx_checksum, result.tx_checksum.wrapping_add(1));
    }

    #[test]
    fn test_run_reports_pass() {
        let mut console = Console::new(Cursor::new(Vec::<u8>::new()), Vec::new(), Pacing::Instant);
        let result = run(&mut console, &mut StdRandom::seeded(5)).unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();

        assert!(result.passed());
        assert!(out.contains("[INFO] Progress: 100%..."));
        assert!(out.contains(&format!(
            "[RECV] PCIe Link Test: PASS (Integrity OK, checksum=0x{:04X})",
            result.rx_checksum
        )));
        assert!(!out.contains("[FAIL]"));
    }

    #[test]
    fn test_run_with_corrupting_link_reports_fail() {
        let mut console = Console::new(Cursor::new(Vec::<u8>::new()), Vec::new(), Pacing::Instant);
        let result = run_with_link(&mut console, &mut StdRandom::seeded(5), flip_first_byte).unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();

        assert!(!result.passed());
        assert!(out.contains("[FAIL] Data mismatch detected in loopback test."));
        assert!(!out.contains("PASS"));
    }
}
