//! Behavioral filter model used to verify the pipelined engine.
//!
//! Plain dot product over the sample window, same alignment and rescale as
//! the datapath, no notion of cycles. One call per accepted sample gives
//! the ground truth for that sample's output word.

use anyhow::Result;

use crate::coeffs::CoeffTable;
use crate::fixed;

pub struct ReferenceFir {
    coeffs: CoeffTable,
    /// Newest sample first, like the hardware delay line.
    window: Vec<i16>,
    fractional_bits: u32,
}

impl ReferenceFir {
    pub fn new(coeffs: CoeffTable, fractional_bits: u32) -> Result<Self> {
        anyhow::ensure!(
            fractional_bits <= 15,
            "fractional_bits {} exceeds the 15 fraction bits of a Q1.15 word",
            fractional_bits
        );
        let window = vec![0; coeffs.len()];
        Ok(Self {
            coeffs,
            window,
            fractional_bits,
        })
    }

    /// Shift in one sample and return its output word.
    pub fn push(&mut self, sample: i16) -> i16 {
        self.window.rotate_right(1);
        self.window[0] = sample;

        // oldest sample meets coefficient 0
        let mut acc = 0i64;
        for (x, c) in self.window.iter().rev().zip(self.coeffs.taps()) {
            acc += i64::from(i32::from(*x) * i32::from(*c));
        }
        fixed::rescale(acc, self.fractional_bits)
    }

    /// Forget all history, as a master reset of the engine does.
    pub fn reset(&mut self) {
        self.window.fill(0);
    }

    /// Run a whole stream through a fresh window.
    pub fn run(&mut self, samples: &[i16]) -> Vec<i16> {
        self.reset();
        samples.iter().map(|s| self.push(*s)).collect()
    }
}
