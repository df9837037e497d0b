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

//! Identity of the attached accelerator card, shown in the menu header.
//!
//! The identity is fetched once at startup. [`DeviceInfo::query`] asks `xbutil examine`
//! for the device name and serial number and falls back field by field to the
//! configured values whenever the tool is missing, fails, or prints something unexpected.

use crate::config::settings::Settings;
use crate::config::{FALLBACK_CONNECTION, FALLBACK_DEVICE, FALLBACK_FIRMWARE, FALLBACK_SERIAL};
use crate::xrt;
use log::{debug, warn};
use std::fmt;
use std::path::Path;

const BANNER_RULE: &str = "=========================================================";
const BANNER_TITLE: &str = "==        Alveo U50 Live Diagnostics Interface         ==";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub device: String,
    pub firmware: String,
    pub connection: String,
    pub serial: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        DeviceInfo::fallback(FALLBACK_DEVICE, FALLBACK_FIRMWARE)
    }
}

impl DeviceInfo {
    /// Identity with the given device and firmware names and the fixed connection and serial.
    pub fn fallback(device: &str, firmware: &str) -> DeviceInfo {
        DeviceInfo {
            device: device.to_owned(),
            firmware: firmware.to_owned(),
            connection: FALLBACK_CONNECTION.to_owned(),
            serial: FALLBACK_SERIAL.to_owned(),
        }
    }

    /// Fallback identity for a configured session: the target device and the active bitstream.
    pub fn from_settings(settings: &Settings) -> DeviceInfo {
        DeviceInfo::fallback(&settings.target_device, &settings.firmware_name())
    }

    /// Pick the device name and serial number out of `xbutil examine` output.
    ///
    /// The first `key : value` line mentioning `Device` and the first mentioning `S/N` are
    /// used, taking the text after their last `:`. Anything not found keeps the `fallback`
    /// value.
    pub fn from_examine(output: &str, fallback: DeviceInfo) -> DeviceInfo {
        let field = |marker: &str| {
            output.lines().find_map(|line| {
                let (_, value) = line.rsplit_once(':')?;
                let value = value.trim();
                (line.contains(marker) && !value.is_empty()).then(|| value.to_owned())
            })
        };
        DeviceInfo {
            device: field("Device").unwrap_or(fallback.device),
            serial: field("S/N").unwrap_or(fallback.serial),
            ..fallback
        }
    }

    /// Ask the live tool for the identity, never failing.
    pub fn query(xbutil: &Path, fallback: DeviceInfo) -> DeviceInfo {
        match xrt::examine(xbutil) {
            Ok(output) => {
                let info = DeviceInfo::from_examine(&output, fallback);
                debug!("Live device identity: {info:?}");
                info
            }
            Err(e) => {
                warn!("Using fallback device identity because the live query failed: {e}");
                fallback
            }
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER_RULE}")?;
        writeln!(f, "{BANNER_TITLE}")?;
        writeln!(f, "{BANNER_RULE}")?;
        writeln!(f, "Target Device: {}", self.device)?;
        writeln!(f, "Firmware:      {}", self.firmware)?;
        writeln!(f, "Connection:    {}", self.connection)?;
        write!(f, "Serial No.:    {}", self.serial)
    }
}
