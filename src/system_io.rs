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

//! Error Wrapping File System I/O Helpers
//!
//! Thin wrappers around the standard library file system calls the console needs
//! (reading the config file, listing the bitstream directory and reading modification
//! times). Every helper logs at trace level and converts failures into a `DiagError`
//! carrying the offending path.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use u50diag::system_io::{fs_read, fs_read_dir};
//! # use std::path::Path;
//!
//! # fn example() -> Result<(), u50diag::error::DiagError> {
//! let content = fs_read(Path::new("./prog_config.txt"))?;
//! let entries = fs_read_dir(Path::new("./bit_file"))?;
//! # Ok(())
//! # }
//! ```

use crate::error::DiagError;
use log::trace;
use std::fs::OpenOptions;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Read the contents of a file to a String.
///
/// # Arguments
///
/// * `file_path` - Path to the file to read
///
/// # Returns: `Result<String, DiagError>`
/// * `Ok(String)` - The complete contents of the file
/// * `Err(DiagError::IORead)` - If the file cannot be read (doesn't exist, permissions, etc.)
pub fn fs_read(file_path: &Path) -> Result<String, DiagError> {
    trace!("Attempting to read from {file_path:?}");
    let mut buf: String = String::new();
    let result = OpenOptions::new()
        .read(true)
        .open(file_path)
        .and_then(|mut f| f.read_to_string(&mut buf));

    match result {
        Ok(_) => {
            trace!("Reading done");
            Ok(buf)
        }
        Err(e) => Err(DiagError::IORead {
            file: file_path.into(),
            e,
        }),
    }
}

/// Read the contents of a directory and return the full path of every entry.
///
/// Entries that cannot be read are silently skipped.
///
/// # Returns: `Result<Vec<PathBuf>, DiagError>`
/// * `Ok(Vec<PathBuf>)` - Paths of the files and subdirectories in `dir`
/// * `Err(DiagError::IOReadDir)` - If the directory cannot be read
pub fn fs_read_dir(dir: &Path) -> Result<Vec<PathBuf>, DiagError> {
    trace!("Attempting to read directory '{dir:?}'");
    std::fs::read_dir(dir).map_or_else(
        |e| {
            Err(DiagError::IOReadDir {
                dir: dir.to_owned(),
                e,
            })
        },
        |iter| {
            let ret = iter
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .collect();
            trace!("Dir reading done.");
            Ok(ret)
        },
    )
}

/// Get the last modification time of a file.
///
/// # Returns: `Result<SystemTime, DiagError>`
/// * `Ok(SystemTime)` - The modification time reported by the file system
/// * `Err(DiagError::IORead)` - If the metadata cannot be read
pub fn fs_modified(file_path: &Path) -> Result<SystemTime, DiagError> {
    trace!("Reading modification time of {file_path:?}");
    std::fs::metadata(file_path)
        .and_then(|meta| meta.modified())
        .map_err(|e| DiagError::IORead {
            file: file_path.into(),
            e,
        })
}
