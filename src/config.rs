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

//! Hardcoded defaults and the runtime configuration layers.
//!
//! The values in this file are used whenever neither the command line nor
//! `prog_config.txt` provide an override. See [`prog_config`] for the file format and
//! [`settings`] for the resolved, immutable configuration handed to the rest of the console.

pub mod prog_config;
pub mod settings;

/// The default location of the programming config file, relative to the working directory.
pub static CONFIG_FILE: &str = "./prog_config.txt";

/// The default directory scanned for bitstream artifacts.
pub static BIT_DIR: &str = "./bit_file";

/// File extension (without the dot) that marks a bitstream artifact.
pub static BITSTREAM_EXTENSION: &str = "bit";

/// The default install location of the XRT command line tools.
pub static XRT_BIN_PATH: &str = "/opt/xilinx/xrt/bin";

/// Name of the (simulated) XRT utility. `xbflash` and `xbtutil` are the same tool.
pub static XBUTIL: &str = "xbutil";

/// How long the simulated bitstream transfer takes, in seconds.
pub const PROGRAM_DURATION_SECS: u64 = 25;

/// Number of cells in a progress bar.
pub const PROGRESS_BAR_WIDTH: usize = 50;

// Identity reported when no live device query is possible and nothing was configured
pub static FALLBACK_DEVICE: &str = "xilinx_u50_gen3x16_xdma_201920_3";
pub static FALLBACK_FIRMWARE: &str = "alveo_u50_top.bit";
pub static FALLBACK_CONNECTION: &str = "JTAG-over-PCIe";
pub static FALLBACK_SERIAL: &str = "21340D8XYZ123";
