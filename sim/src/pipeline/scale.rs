//! The output stage: rescale the tree root and register the result.

use crate::fixed;

#[derive(Debug, Clone, Default)]
pub struct OutputReg {
    sample: i16,
}

impl OutputReg {
    pub fn latch_scaled(&mut self, root: i64, fractional_bits: u32) {
        self.sample = fixed::rescale(root, fractional_bits);
    }

    pub fn clear(&mut self) {
        self.sample = 0;
    }

    pub fn sample(&self) -> i16 {
        self.sample
    }
}
