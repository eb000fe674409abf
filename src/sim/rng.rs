//! Seeded random stream for the daily challenge
//!
//! Every player on the same day must see the same roster, so the stream is
//! mulberry32: a 32-bit accumulator bumped by a fixed odd constant, then two
//! multiply-xor-shift finalising rounds. The output must stay bit-compatible
//! with other runtimes that share the daily seed.

use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Weyl increment added to the accumulator on every draw
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
/// 2^32, maps a `u32` onto [0, 1)
const UNIT_SCALE: f64 = 4_294_967_296.0;

/// A source of uniform values in [0, 1)
///
/// The roster generator only needs this, which lets tests replay a fixed
/// sequence instead of a real seed.
pub trait UnitStream {
    fn next_unit(&mut self) -> f64;
}

/// mulberry32 generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current accumulator value
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance and return the mixed 32-bit output
    pub fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / UNIT_SCALE
    }
}

impl UnitStream for Mulberry32 {
    fn next_unit(&mut self) -> f64 {
        self.next_f64()
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_raw());
        let high = u64::from(self.next_raw());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// Replays a fixed list of values, wrapping around at the end
///
/// Used for golden-value roster checks and for replaying recorded draws.
#[derive(Debug, Clone)]
pub struct ScriptedStream {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedStream {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl UnitStream for ScriptedStream {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
