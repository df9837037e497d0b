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

//! Additive payload checksums used by the transfer diagnostics.

/// Sum of all bytes, truncated to 16 bits.
pub fn additive16(data: &[u8]) -> u16 {
    (additive32(data) & 0xFFFF) as u16
}

/// Sum of all bytes, truncated to 32 bits.
pub fn additive32(data: &[u8]) -> u32 {
    data.iter()
        .fold(0u32, |sum, &byte| sum.wrapping_add(u32::from(byte)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_empty_is_zero() {
        assert_eq!(additive16(&[]), 0);
        assert_eq!(additive32(&[]), 0);
    }

    #[test]
    fn test_additive16_truncates() {
        // 300 * 0xFF = 0x12AD4
        let data = [0xFFu8; 300];
        assert_eq!(additive32(&data), 0x12AD4);
        assert_eq!(additive16(&data), 0x2AD4);
    }

    #[test]
    fn test_additive32_full_buffer() {
        let data = [0xFFu8; 4096];
        assert_eq!(additive32(&data), 4096 * 0xFF);
    }
}
