//! The multiply stage: one product lane per adder tree input.

use crate::coeffs::CoeffTable;

use super::delay::TapDelayLine;

/// Product registers feeding the adder tree. Lanes beyond the tap count
/// are padding and stay zero forever.
#[derive(Debug, Clone)]
pub struct ProductBank {
    lanes: Vec<i32>,
}

impl ProductBank {
    pub fn new(tree_width: usize) -> Self {
        Self {
            lanes: vec![0; tree_width],
        }
    }

    /// Latch the products of the current window against the coefficient
    /// table. A 16x16-bit product is exact in 32 bits, so no checking is
    /// needed here.
    pub fn latch_products(&mut self, window: &TapDelayLine, coeffs: &CoeffTable) {
        for (lane, (sample, coeff)) in self
            .lanes
            .iter_mut()
            .zip(window.window_oldest_first().zip(coeffs.taps()))
        {
            *lane = i32::from(sample) * i32::from(*coeff);
        }
    }

    pub fn clear(&mut self) {
        self.lanes.fill(0);
    }

    pub fn lanes(&self) -> &[i32] {
        &self.lanes
    }
}

#[cfg(test)]
mod tests {
    use super::{ProductBank, TapDelayLine};
    use crate::coeffs::CoeffTable;

    #[test]
    fn pads_to_tree_width() {
        let coeffs = CoeffTable::new(vec![2, -3, 4]).unwrap();
        let mut window = TapDelayLine::new(3);
        for s in [10, 20, 30] {
            window.shift_in(s);
        }
        let mut bank = ProductBank::new(4);
        bank.latch_products(&window, &coeffs);
        // oldest sample 10 meets coefficient 0; the fourth lane is padding
        assert_eq!(bank.lanes(), &[20, -60, 120, 0]);
    }

    #[test]
    fn full_scale_product_is_exact() {
        let coeffs = CoeffTable::new(vec![i16::MIN]).unwrap();
        let mut window = TapDelayLine::new(1);
        window.shift_in(i16::MIN);
        let mut bank = ProductBank::new(1);
        bank.latch_products(&window, &coeffs);
        assert_eq!(bank.lanes(), &[1 << 30]);
    }
}
