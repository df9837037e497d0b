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

use googletest::prelude::*;
use std::fmt::Debug;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use u50diag::console::{Console, Pacing};

pub type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

pub static TARGET_DEVICE: &str = "xilinx_u50_gen3x16_xdma_201920_3";

/// A scratch project root holding `prog_config.txt` and a `bit_file/` directory.
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new(config: Option<&str>, bitstreams: &[&str]) -> Workspace {
        let root = TempDir::new().expect("failed to create workspace");
        if let Some(config) = config {
            std::fs::write(root.path().join("prog_config.txt"), config)
                .expect("failed to write prog_config.txt");
        }
        std::fs::create_dir(root.path().join("bit_file")).expect("failed to create bit_file");
        for name in bitstreams {
            std::fs::write(root.path().join("bit_file").join(name), b"\xaa\x99\x55\x66")
                .expect("failed to write bitstream");
        }
        Workspace { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn config_file(&self) -> PathBuf {
        self.path().join("prog_config.txt")
    }

    pub fn bit_dir(&self) -> PathBuf {
        self.path().join("bit_file")
    }

    /// An XRT install location that does not exist, so live queries always fall back.
    pub fn missing_xrt(&self) -> PathBuf {
        self.path().join("no_xrt")
    }
}

pub fn console_with_input(input: &str) -> TestConsole {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Pacing::Instant)
}

pub fn transcript(console: TestConsole) -> String {
    String::from_utf8(console.into_output()).expect("console output is not UTF-8")
}

pub fn compare_result<T: Debug, E: ToString + Debug>(
    res: &std::result::Result<T, E>,
    exp: &std::result::Result<&str, &str>,
) {
    match (res, exp) {
        (Ok(_), Ok(_)) => {}
        (Err(res_err), Err(exp_err)) => {
            assert_that!(
                res_err.to_string(),
                contains_substring(*exp_err),
                "Mismatched error signature"
            );
        }
        (res, exp) => {
            panic!("Result mismatch: got {res:?}, expected {exp:?}");
        }
    }
}
