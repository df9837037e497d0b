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

//! Timed textual progress indicators.

use crate::console::Console;
use crate::error::DiagError;
use std::io::{BufRead, Write};
use std::time::Duration;

const FILLED: char = '█';

/// Render one frame of a bar with `filled` of `width` cells done.
///
/// ```rust
/// # use u50diag::progress::render_bar;
/// assert_eq!(render_bar("Loading", 1, 4), "Loading [█   ] 25%");
/// ```
pub fn render_bar(message: &str, filled: usize, width: usize) -> String {
    let filled = filled.min(width);
    let percentage = (filled * 100).checked_div(width).unwrap_or(100);
    format!(
        "{message} [{}{}] {percentage}%",
        FILLED.to_string().repeat(filled),
        " ".repeat(width - filled)
    )
}

/// Draw a bar that fills over `duration`, one cell per update, then end the line.
pub fn progress_bar<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    message: &str,
    duration: Duration,
    width: usize,
) -> Result<(), DiagError> {
    let tick = duration.checked_div(width as u32).unwrap_or(Duration::ZERO);
    for filled in 0..=width {
        console.overwrite(render_bar(message, filled, width))?;
        console.pause(tick)?;
    }
    console.blank()
}

/// Count from 0 % to 100 % in `step` percent increments, pausing `tick` after each.
pub fn percent_counter<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    step: usize,
    tick: Duration,
) -> Result<(), DiagError> {
    for percent in (0..=100).step_by(step.max(1)) {
        console.overwrite(format!("[INFO] Progress: {percent}%..."))?;
        console.pause(tick)?;
    }
    Ok(())
}
