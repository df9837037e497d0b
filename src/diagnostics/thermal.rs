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

//! On-chip thermal sensor readout.
//!
//! Each sensor returns an ADC code near its nominal value. The code is converted with a
//! fixed linear scale: `celsius = base + (code - nominal) * 0.01`.

use crate::console::Console;
use crate::error::DiagError;
use crate::random::RandomSource;
use log::warn;
use std::io::{BufRead, Write};
use std::time::Duration;

/// Degrees Celsius per ADC code.
pub const CELSIUS_PER_CODE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensor {
    pub raw_label: &'static str,
    pub temperature_label: &'static str,
    pub nominal_code: u16,
    pub jitter: i32,
    pub base_celsius: f64,
    pub limit_celsius: f64,
}

pub const FPGA_DIE: Sensor = Sensor {
    raw_label: "FPGA ADC raw",
    temperature_label: "FPGA Die Temperature",
    nominal_code: 0x3E80,
    jitter: 16,
    base_celsius: 62.5,
    limit_celsius: 100.0,
};

pub const HBM_STACK: Sensor = Sensor {
    raw_label: "HBM  ADC raw",
    temperature_label: "HBM Stack Temperature",
    nominal_code: 0x3B60,
    jitter: 8,
    base_celsius: 58.2,
    limit_celsius: 95.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub code: u16,
    pub celsius: f64,
}

impl Sensor {
    pub fn celsius(&self, code: u16) -> f64 {
        self.base_celsius + (f64::from(code) - f64::from(self.nominal_code)) * CELSIUS_PER_CODE
    }

    pub fn read(&self, rng: &mut dyn RandomSource) -> SensorReading {
        let offset = rng.int_in(-self.jitter, self.jitter);
        let code = (i32::from(self.nominal_code) + offset) as u16;
        SensorReading {
            code,
            celsius: self.celsius(code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalReading {
    pub fpga: SensorReading,
    pub hbm: SensorReading,
}

impl ThermalReading {
    pub fn sample(rng: &mut dyn RandomSource) -> ThermalReading {
        ThermalReading {
            fpga: FPGA_DIE.read(rng),
            hbm: HBM_STACK.read(rng),
        }
    }

    pub fn within_limits(&self) -> bool {
        self.fpga.celsius < FPGA_DIE.limit_celsius && self.hbm.celsius < HBM_STACK.limit_celsius
    }
}

pub fn run<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    rng: &mut dyn RandomSource,
) -> Result<ThermalReading, DiagError> {
    console.blank()?;
    console.line("[CMD] Reading thermal sensor array...")?;
    console.pause(Duration::from_millis(600))?;

    let reading = ThermalReading::sample(rng);
    for (sensor, value) in [(FPGA_DIE, reading.fpga), (HBM_STACK, reading.hbm)] {
        console.line(format!("[AXI-RD] {} = 0x{:X}", sensor.raw_label, value.code))?;
    }
    for (sensor, value) in [(FPGA_DIE, reading.fpga), (HBM_STACK, reading.hbm)] {
        console.line(format!(
            "[RECV] {}: {:.2} C",
            sensor.temperature_label, value.celsius
        ))?;
    }
    if reading.within_limits() {
        console.line("[INFO] Thermal status: OK")?;
    } else {
        warn!("Thermal limits exceeded: {reading:?}");
        console.line("[WARN] Thermal status: OVER LIMIT")?;
    }
    Ok(reading)
}
