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

//! The interactive diagnostics menu.
//!
//! The loop is a small state machine:
//!
//! ```text
//!   Idle ──redraw──▶ AwaitingInput ──1..4──▶ Dispatching ──Enter──▶ Idle
//!                     │    ▲                      │
//!                     │    └──── invalid input    └── input closed ──┐
//!                     └── q / Q / input closed ──▶ Disconnecting ──▶ Terminal
//! ```
//!
//! Input maps to a [`MenuCommand`] through a total function: anything that is not one of
//! the known characters becomes [`MenuCommand::Invalid`], which is reported and otherwise
//! ignored.

use crate::console::Console;
use crate::device_info::DeviceInfo;
use crate::diagnostics::Diagnostic;
use crate::error::DiagError;
use crate::random::RandomSource;
use log::{debug, info};
use std::io::{BufRead, Write};
use std::time::Duration;

pub const PROMPT: &str = ">> ";
pub const ACKNOWLEDGE_PROMPT: &str = "Press [Enter] to return to the menu...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    Run(Diagnostic),
    Quit,
    Invalid(String),
}

impl MenuCommand {
    /// Map one line of input to a command. Surrounding whitespace is ignored and `q` is
    /// accepted in either case.
    pub fn parse(input: &str) -> MenuCommand {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some('1'), None) => MenuCommand::Run(Diagnostic::HbmStatus),
            (Some('2'), None) => MenuCommand::Run(Diagnostic::PcieLoopback),
            (Some('3'), None) => MenuCommand::Run(Diagnostic::Temperature),
            (Some('4'), None) => MenuCommand::Run(Diagnostic::SendData),
            (Some('q' | 'Q'), None) => MenuCommand::Quit,
            _ => MenuCommand::Invalid(trimmed.to_owned()),
        }
    }
}

/// Key that selects `diagnostic` in the menu.
pub fn menu_key(diagnostic: Diagnostic) -> char {
    match diagnostic {
        Diagnostic::HbmStatus => '1',
        Diagnostic::PcieLoopback => '2',
        Diagnostic::Temperature => '3',
        Diagnostic::SendData => '4',
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    Idle,
    AwaitingInput,
    Dispatching(Diagnostic),
    Disconnecting,
    Terminal,
}

pub struct MenuLoop<'a> {
    device: &'a DeviceInfo,
}

impl<'a> MenuLoop<'a> {
    pub fn new(device: &'a DeviceInfo) -> MenuLoop<'a> {
        MenuLoop { device }
    }

    /// Serve the menu until the user quits or input is closed.
    ///
    /// # Returns: `Result<Vec<Diagnostic>, DiagError>`
    /// * `Ok(Vec<Diagnostic>)` - The diagnostics that ran, in order
    /// * `Err(DiagError::Console)` - Reading or writing the terminal failed
    pub fn run<I: BufRead, O: Write>(
        &self,
        console: &mut Console<I, O>,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Diagnostic>, DiagError> {
        let mut dispatched = Vec::new();
        let mut state = MenuState::Idle;
        while state != MenuState::Terminal {
            state = match state {
                MenuState::Idle => {
                    self.redraw(console)?;
                    MenuState::AwaitingInput
                }
                MenuState::AwaitingInput => match console.prompt(PROMPT)? {
                    None => MenuState::Disconnecting,
                    Some(line) => self.dispatch(console, MenuCommand::parse(&line))?,
                },
                MenuState::Dispatching(diagnostic) => {
                    diagnostic.run(console, rng)?;
                    dispatched.push(diagnostic);
                    console.blank()?;
                    match console.prompt(ACKNOWLEDGE_PROMPT)? {
                        Some(_) => MenuState::Idle,
                        None => MenuState::Disconnecting,
                    }
                }
                MenuState::Disconnecting => {
                    console.blank()?;
                    console.line("Disconnecting from device...")?;
                    console.pause(Duration::from_secs(1))?;
                    info!("Menu closed after {} diagnostics", dispatched.len());
                    MenuState::Terminal
                }
                MenuState::Terminal => MenuState::Terminal,
            };
        }
        Ok(dispatched)
    }

    fn dispatch<I: BufRead, O: Write>(
        &self,
        console: &mut Console<I, O>,
        command: MenuCommand,
    ) -> Result<MenuState, DiagError> {
        debug!("Menu command {command:?}");
        Ok(match command {
            MenuCommand::Run(diagnostic) => MenuState::Dispatching(diagnostic),
            MenuCommand::Quit => MenuState::Disconnecting,
            MenuCommand::Invalid(_) => {
                console.blank()?;
                console.line("Invalid option.")?;
                MenuState::AwaitingInput
            }
        })
    }

    fn redraw<I: BufRead, O: Write>(&self, console: &mut Console<I, O>) -> Result<(), DiagError> {
        console.clear_screen()?;
        console.line(self.device)?;
        console.blank()?;
        console.blank()?;
        console.line("Select a diagnostic command:")?;
        for diagnostic in Diagnostic::ALL {
            console.line(format!(
                "  [{}] {}",
                menu_key(diagnostic),
                diagnostic.title()
            ))?;
        }
        console.line("  [q] Quit")
    }
}
