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

//! The resolved runtime configuration.
//!
//! [`Settings`] is built once at startup from the merged [`ProgConfig`] layers and is then
//! passed by reference to the startup sequencer and the menu loop. Nothing reads the
//! config file after this point.

use crate::bitstream::latest_bitstream;
use crate::config::prog_config::{ProgConfig, TARGET_DEVICE_KEY};
use crate::config::{BIT_DIR, PROGRAM_DURATION_SECS, XBUTIL, XRT_BIN_PATH};
use crate::error::DiagError;
use log::{info, trace};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub target_device: String,
    pub bitstream: PathBuf,
    pub xrt_bin_dir: PathBuf,
    pub program_duration: Duration,
}

impl Settings {
    /// Turn a merged config layer into settings, filling gaps with hardcoded defaults and
    /// locating the active bitstream.
    ///
    /// # Returns: `Result<Settings, DiagError>`
    /// * `Err(DiagError::Config)` - `TARGET_DEVICE` was not provided
    /// * `Err(DiagError::Bitstream)` / `Err(DiagError::IOReadDir)` - No usable bitstream
    pub fn resolve(config: ProgConfig) -> Result<Settings, DiagError> {
        let target_device = config.target_device.ok_or_else(|| {
            DiagError::Config(format!("{TARGET_DEVICE_KEY} not defined in config file."))
        })?;
        let bit_dir = config.bit_dir.unwrap_or_else(|| {
            trace!("No BIT_DIR provided. Using hardcoded value.");
            PathBuf::from(BIT_DIR)
        });
        let xrt_bin_dir = config.xrt_bin_path.unwrap_or_else(|| {
            trace!("No XRT_BIN_PATH provided. Using hardcoded value.");
            PathBuf::from(XRT_BIN_PATH)
        });
        let program_duration = config
            .program_duration
            .unwrap_or(Duration::from_secs(PROGRAM_DURATION_SECS));

        let bitstream = latest_bitstream(&bit_dir)?;
        info!("Using bitstream {bitstream:?} for {target_device}");
        Ok(Settings {
            target_device,
            bitstream,
            xrt_bin_dir,
            program_duration,
        })
    }

    /// Directory holding the active bitstream.
    pub fn output_dir(&self) -> &Path {
        self.bitstream.parent().unwrap_or(Path::new("."))
    }

    /// File name of the active bitstream, as shown in the device header.
    pub fn firmware_name(&self) -> String {
        self.bitstream
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.bitstream.display().to_string())
    }

    /// Full path of the `xbutil` binary.
    pub fn xbutil(&self) -> PathBuf {
        self.xrt_bin_dir.join(XBUTIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bit_dir_with(name: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(name), b"\x00\x09\x0f\xf0").unwrap();
        temp
    }

    #[test]
    fn test_resolve_fills_defaults() {
        let bits = bit_dir_with("alveo_u50_top.bit");
        let settings = Settings::resolve(ProgConfig {
            target_device: Some("dev0".to_string()),
            bit_dir: Some(bits.path().to_owned()),
            ..ProgConfig::default()
        })
        .unwrap();

        assert_eq!(settings.target_device, "dev0");
        assert_eq!(settings.bitstream, bits.path().join("alveo_u50_top.bit"));
        assert_eq!(settings.xrt_bin_dir, PathBuf::from(XRT_BIN_PATH));
        assert_eq!(settings.program_duration, Duration::from_secs(25));
        assert_eq!(settings.output_dir(), bits.path());
        assert_eq!(settings.firmware_name(), "alveo_u50_top.bit");
        assert_eq!(
            settings.xbutil(),
            PathBuf::from("/opt/xilinx/xrt/bin/xbutil")
        );
    }

    #[test]
    fn test_resolve_without_target_device_fails() {
        let bits = bit_dir_with("a.bit");
        let result = Settings::resolve(ProgConfig {
            bit_dir: Some(bits.path().to_owned()),
            ..ProgConfig::default()
        });
        assert!(matches!(result, Err(DiagError::Config(_))), "{result:?}");
    }

    #[test]
    fn test_resolve_without_bitstream_fails() {
        let empty = TempDir::new().unwrap();
        let result = Settings::resolve(ProgConfig {
            target_device: Some("dev0".to_string()),
            bit_dir: Some(empty.path().to_owned()),
            ..ProgConfig::default()
        });
        assert!(matches!(result, Err(DiagError::Bitstream(_))), "{result:?}");
    }
}
