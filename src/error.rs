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

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DiagError {
    #[error("DiagError::ConfigMissing: Missing {0:?}. Please create it in the project root.")]
    ConfigMissing(PathBuf),
    #[error("DiagError::Config: {0}")]
    Config(String),
    #[error("DiagError::Bitstream: {0}")]
    Bitstream(String),
    #[error("DiagError::Step: [STEP {index}/{total}] {label} failed: {message}")]
    Step {
        index: usize,
        total: usize,
        label: String,
        message: String,
    },
    #[error("DiagError::IORead: An IO error occurred when reading from {file:?}: {e}")]
    IORead { file: PathBuf, e: std::io::Error },
    #[error("DiagError::IOReadDir: An IO error occurred when reading directory {dir:?}: {e}")]
    IOReadDir { dir: PathBuf, e: std::io::Error },
    #[error("DiagError::Tool: Failed to query device with {tool:?}: {reason}")]
    Tool { tool: PathBuf, reason: String },
    #[error("DiagError::Console: Terminal I/O failed: {0}")]
    Console(#[from] std::io::Error),
}

impl DiagError {
    /// Process exit status for a fatal error. Every fatal condition maps to `1`.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
