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

//! Parsing and layering of `prog_config.txt`.
//!
//! The file is a list of `KEY=value` lines. Lines without `=` are ignored, the line is
//! split at the first `=` and both halves are trimmed. A key given twice keeps its last
//! value. Recognised keys:
//!
//! ```text
//! TARGET_DEVICE=xilinx_u50_gen3x16_xdma_201920_3   # required
//! BIT_DIR=./bit_file                               # optional
//! XRT_BIN_PATH=/opt/xilinx/xrt/bin                 # optional
//! PROGRAM_DURATION=25                              # optional, seconds
//! ```
//!
//! Command line overrides are expressed as another [`ProgConfig`] and combined with
//! [`ProgConfig::merge`], so the precedence is: command line, then file, then the
//! hardcoded values in [`crate::config`].

use crate::error::DiagError;
use crate::system_io::fs_read;
use log::trace;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TARGET_DEVICE_KEY: &str = "TARGET_DEVICE";
pub const BIT_DIR_KEY: &str = "BIT_DIR";
pub const XRT_BIN_PATH_KEY: &str = "XRT_BIN_PATH";
pub const PROGRAM_DURATION_KEY: &str = "PROGRAM_DURATION";

/// One configuration layer. Every field is optional so layers can be merged.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProgConfig {
    pub target_device: Option<String>,
    pub bit_dir: Option<PathBuf>,
    pub xrt_bin_path: Option<PathBuf>,
    pub program_duration: Option<Duration>,
}

impl ProgConfig {
    /// Parse the `KEY=value` text of a config file.
    ///
    /// # Returns: `Result<ProgConfig, DiagError>`
    /// * `Ok(ProgConfig)` - The keys found in `text`. Empty values count as absent.
    /// * `Err(DiagError::Config)` - `PROGRAM_DURATION` is not a non-negative number of seconds
    pub fn parse(text: &str) -> Result<ProgConfig, DiagError> {
        let mut config = ProgConfig::default();
        for line in text.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            let value = (!value.is_empty()).then_some(value);
            match key {
                TARGET_DEVICE_KEY => config.target_device = value.map(str::to_owned),
                BIT_DIR_KEY => config.bit_dir = value.map(PathBuf::from),
                XRT_BIN_PATH_KEY => config.xrt_bin_path = value.map(PathBuf::from),
                PROGRAM_DURATION_KEY => {
                    config.program_duration = value.map(parse_seconds).transpose()?;
                }
                _ => trace!("Ignoring unknown config key '{key}'"),
            }
        }
        Ok(config)
    }

    /// Read and parse a config file.
    ///
    /// # Returns: `Result<ProgConfig, DiagError>`
    /// * `Err(DiagError::ConfigMissing)` - `file_path` is not a file
    /// * `Err(DiagError::IORead)` - The file exists but could not be read
    /// * `Err(DiagError::Config)` - A value could not be parsed
    pub fn from_file(file_path: &Path) -> Result<ProgConfig, DiagError> {
        if !file_path.is_file() {
            return Err(DiagError::ConfigMissing(file_path.to_owned()));
        }
        let config = ProgConfig::parse(&fs_read(file_path)?)?;
        trace!("Loaded {config:?} from {file_path:?}");
        Ok(config)
    }

    /// Fill every field not set in `self` from `fallback`.
    pub fn merge(self, fallback: ProgConfig) -> ProgConfig {
        ProgConfig {
            target_device: self.target_device.or(fallback.target_device),
            bit_dir: self.bit_dir.or(fallback.bit_dir),
            xrt_bin_path: self.xrt_bin_path.or(fallback.xrt_bin_path),
            program_duration: self.program_duration.or(fallback.program_duration),
        }
    }
}

fn parse_seconds(value: &str) -> Result<Duration, DiagError> {
    value
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| {
            DiagError::Config(format!(
                "{PROGRAM_DURATION_KEY} must be a non-negative number of seconds, got '{value}'"
            ))
        })
}
