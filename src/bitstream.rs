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

//! Discovery of the active bitstream artifact.
//!
//! The artifact directory is scanned for files with the bitstream extension and the most
//! recently modified one wins. Files with identical modification times are ordered by
//! file name so the choice is stable between runs.

use crate::config::BITSTREAM_EXTENSION;
use crate::error::DiagError;
use crate::system_io::{fs_modified, fs_read_dir};
use log::{debug, trace};
use std::path::{Path, PathBuf};

/// Find the newest `*.bit` file in `dir`.
///
/// # Returns: `Result<PathBuf, DiagError>`
/// * `Ok(PathBuf)` - Path of the selected bitstream
/// * `Err(DiagError::Bitstream)` - The directory holds no bitstream
/// * `Err(DiagError::IOReadDir)` - The directory could not be listed
pub fn latest_bitstream(dir: &Path) -> Result<PathBuf, DiagError> {
    latest_with_extension(dir, BITSTREAM_EXTENSION)
}

/// Find the most recently modified file in `dir` whose extension is `extension`.
pub fn latest_with_extension(dir: &Path, extension: &str) -> Result<PathBuf, DiagError> {
    let mut candidates = Vec::new();
    for path in fs_read_dir(dir)? {
        if !path.is_file() || path.extension().is_none_or(|ext| ext != extension) {
            continue;
        }
        let modified = fs_modified(&path)?;
        trace!("Bitstream candidate {path:?} modified at {modified:?}");
        candidates.push((modified, path));
    }
    candidates.sort();
    match candidates.pop() {
        Some((_, path)) => {
            debug!("Selected bitstream {path:?}");
            Ok(path)
        }
        None => Err(DiagError::Bitstream(format!(
            "No .{extension} file found in {dir:?} directory."
        ))),
    }
}
