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

//! The single source of randomness for every simulated outcome.
//!
//! Everything the console fabricates (tool outcomes, register words, payloads, sensor
//! jitter, latencies and pause lengths) is drawn through [`RandomSource`]. Production runs
//! use [`StdRandom`]. [`Scripted`] forces the pass/fail coin flips and is used by
//! `--always-pass` and by the tests.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::VecDeque;

pub trait RandomSource {
    /// Unweighted 50/50 outcome of a simulated tool invocation.
    fn coin_flip(&mut self) -> bool;

    /// Uniform integer in `low..=high`.
    fn int_in(&mut self, low: i32, high: i32) -> i32;

    /// Uniform real in `low..high`. Returns `low` when the range is empty.
    fn real_in(&mut self, low: f64, high: f64) -> f64;

    /// Fill `buf` with random bytes.
    fn fill(&mut self, buf: &mut [u8]);

    /// Uniform index in `0..len`. `len` must not be zero.
    fn index(&mut self, len: usize) -> usize;
}

/// [`RandomSource`] backed by `rand`'s `StdRng`.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        StdRandom {
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible source. The same seed always yields the same session.
    pub fn seeded(seed: u64) -> Self {
        StdRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn int_in(&mut self, low: i32, high: i32) -> i32 {
        self.rng.gen_range(low..=high)
    }

    fn real_in(&mut self, low: f64, high: f64) -> f64 {
        if low < high {
            self.rng.gen_range(low..high)
        } else {
            low
        }
    }

    fn fill(&mut self, buf: &mut [u8]) {
        self.rng.fill_bytes(buf);
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// A source whose coin flips follow a script.
///
/// Flips are taken from the scripted queue first; once it runs dry every flip returns
/// `then`. All other draws come from a seeded [`StdRandom`].
#[derive(Debug, Clone)]
pub struct Scripted {
    outcomes: VecDeque<bool>,
    then: bool,
    inner: StdRandom,
}

impl Scripted {
    pub fn new(outcomes: impl IntoIterator<Item = bool>, then: bool, seed: u64) -> Self {
        Scripted {
            outcomes: outcomes.into_iter().collect(),
            then,
            inner: StdRandom::seeded(seed),
        }
    }

    /// Every coin flip returns `outcome`.
    pub fn always(outcome: bool, seed: u64) -> Self {
        Scripted::new([], outcome, seed)
    }

    /// Number of scripted flips not consumed yet.
    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }
}

impl RandomSource for Scripted {
    fn coin_flip(&mut self) -> bool {
        self.outcomes.pop_front().unwrap_or(self.then)
    }

    fn int_in(&mut self, low: i32, high: i32) -> i32 {
        self.inner.int_in(low, high)
    }

    fn real_in(&mut self, low: f64, high: f64) -> f64 {
        self.inner.real_in(low, high)
    }

    fn fill(&mut self, buf: &mut [u8]) {
        self.inner.fill(buf);
    }

    fn index(&mut self, len: usize) -> usize {
        self.inner.index(len)
    }
}
