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

// End-to-end sessions driven through the library with scripted input and outcomes.

mod common;

use common::test_functions::{
    TARGET_DEVICE, Workspace, compare_result, console_with_input, transcript,
};
use googletest::prelude::*;
use rstest::*;
use u50diag::config::prog_config::ProgConfig;
use u50diag::config::settings::Settings;
use u50diag::device_info::DeviceInfo;
use u50diag::diagnostics::Diagnostic;
use u50diag::error::DiagError;
use u50diag::menu::MenuLoop;
use u50diag::random::{Scripted, StdRandom};
use u50diag::sequencer::StartupSequence;

static CONFIG: &str = "TARGET_DEVICE=xilinx_u50_gen3x16_xdma_201920_3\n";

#[fixture]
fn workspace() -> Workspace {
    Workspace::new(Some(CONFIG), &["alveo_u50_top.bit"])
}

fn settings_for(workspace: &Workspace) -> std::result::Result<Settings, DiagError> {
    let overrides = ProgConfig {
        bit_dir: Some(workspace.bit_dir()),
        xrt_bin_path: Some(workspace.missing_xrt()),
        ..ProgConfig::default()
    };
    Settings::resolve(overrides.merge(ProgConfig::from_file(&workspace.config_file())?))
}

#[rstest]
fn programs_then_serves_menu_with_configured_device(workspace: Workspace) {
    let settings = settings_for(&workspace).unwrap();
    let mut console = console_with_input("3\n\nq\n");
    let mut rng = Scripted::always(true, 17);

    StartupSequence::standard(&settings)
        .run(&mut console, &mut rng)
        .unwrap();
    let device = DeviceInfo::query(&settings.xbutil(), DeviceInfo::from_settings(&settings));
    let dispatched = MenuLoop::new(&device).run(&mut console, &mut rng).unwrap();
    let out = transcript(console);

    assert_that!(
        out.clone(),
        contains_substring("Programming Completed Successfully")
    );
    assert_that!(
        out.clone(),
        contains_substring(format!("Target Device: {TARGET_DEVICE}"))
    );
    assert_that!(
        out.clone(),
        contains_substring("Firmware:      alveo_u50_top.bit")
    );
    assert_that!(out.clone(), contains_substring("Thermal status: OK"));
    assert_that!(out, contains_substring("Disconnecting from device..."));
    assert_eq!(dispatched, vec![Diagnostic::Temperature]);
}

#[rstest]
fn failed_step_never_reaches_menu(workspace: Workspace) {
    let settings = settings_for(&workspace).unwrap();
    let mut console = console_with_input("1\n\nq\n");
    let mut rng = Scripted::new([true, true, false], true, 0);

    let result = StartupSequence::standard(&settings).run(&mut console, &mut rng);
    let out = transcript(console);

    compare_result(&result, &Err("DiagError::Step: [STEP 3/5]"));
    assert_that!(
        out.clone(),
        contains_substring("[ERROR] Initialization failed. Check JTAG connection.")
    );
    assert_that!(out.clone(), not(contains_substring("[STEP 4/5]")));
    assert_that!(out, not(contains_substring("Select a diagnostic command:")));
}

#[rstest]
fn invalid_input_does_not_break_the_loop() {
    let device = DeviceInfo::fallback(TARGET_DEVICE, "alveo_u50_top.bit");
    let mut console = console_with_input("9\n\nhello\n4\n\n1\n\nq\n");

    let dispatched = MenuLoop::new(&device)
        .run(&mut console, &mut StdRandom::seeded(3))
        .unwrap();
    let out = transcript(console);

    assert_eq!(
        dispatched,
        vec![Diagnostic::SendData, Diagnostic::HbmStatus]
    );
    assert_eq!(out.matches("Invalid option.").count(), 3);
    assert_that!(
        out,
        contains_substring("Kernel_0 returned status OK. Latency:")
    );
}

#[rstest]
#[case::all_good(Some(CONFIG), &["top.bit"], Ok(""))]
#[case::missing_config(None, &["top.bit"], Err("DiagError::ConfigMissing"))]
#[case::missing_target(Some("PROGRAM_DURATION=3\n"), &["top.bit"], Err("TARGET_DEVICE not defined"))]
#[case::empty_target(Some("TARGET_DEVICE=\n"), &["top.bit"], Err("TARGET_DEVICE not defined"))]
#[case::bad_duration(Some("TARGET_DEVICE=d\nPROGRAM_DURATION=x\n"), &["top.bit"], Err("DiagError::Config"))]
#[case::huge_duration(Some("TARGET_DEVICE=d\nPROGRAM_DURATION=1e30\n"), &["top.bit"], Err("DiagError::Config"))]
#[case::no_bitstream(Some(CONFIG), &[], Err("DiagError::Bitstream"))]
#[case::wrong_extension(Some(CONFIG), &["top.bin", "top.bit.bak"], Err("No .bit file found"))]
fn settings_cases(
    #[case] config: Option<&str>,
    #[case] bitstreams: &[&str],
    #[case] expected: std::result::Result<&str, &str>,
) {
    let workspace = Workspace::new(config, bitstreams);
    let res = settings_for(&workspace);
    compare_result(&res, &expected);
}
