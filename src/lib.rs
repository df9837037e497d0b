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

//! u50diag - a simulated live diagnostics console for Alveo U50 accelerator cards.
//!
//! Nothing in this crate talks to hardware. Programming steps, register reads, sensor
//! values and transfer results are all fabricated from a [`random::RandomSource`], paced
//! by blocking pauses so the console looks and feels like a real bring-up session.
//!
//! The console is made of two pieces used one after the other:
//! - [`sequencer::StartupSequence`] - the fixed bitstream programming flow; the first
//!   failing step ends the process with exit code 1
//! - [`menu::MenuLoop`] - the interactive menu dispatching the four
//!   [`diagnostics::Diagnostic`]s until the user quits
//!
//! Both receive an explicit [`config::settings::Settings`] built once at startup and a
//! [`console::Console`] wrapping the terminal, so the whole session can be driven from
//! tests with scripted input and [`console::Pacing::Instant`].

pub mod bitstream;
pub mod checksum;
pub mod config;
pub mod console;
pub mod device_info;
pub mod diagnostics;
pub mod error;
pub mod menu;
pub mod progress;
pub mod random;
pub mod sequencer;
pub mod system_io;
pub mod xrt;
