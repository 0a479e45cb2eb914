//! Static description of a filter pipeline instance.

use anyhow::{ensure, Result};

use crate::fixed;

/// Structural parameters of the pipeline, fixed at construction.
///
/// Every field is checked by [`FilterConfig::validate`] before a single
/// cycle runs; nothing here can change while the engine is stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// Number of filter taps (delay-line depth).
    pub tap_count: usize,
    /// Width of the adder tree input rank. A power of two at least
    /// `tap_count`; the lanes beyond `tap_count` carry constant zero.
    pub tree_width: usize,
    /// Bits shifted off in the final rescale. At most 15 (Q1.15 data).
    pub fractional_bits: u32,
    /// Modeled width of the adder tree node registers.
    pub accumulator_width: u32,
    /// Cycles from an accepted input to its output word: one to capture,
    /// one to multiply, one per tree level, one to rescale.
    pub total_latency: usize,
}

impl FilterConfig {
    /// Derive a full configuration from a tap count: the tree width is the
    /// next power of two, the accumulator takes the minimal safe width and
    /// the latency follows from the tree depth.
    pub fn for_taps(tap_count: usize, fractional_bits: u32) -> Result<Self> {
        ensure!(tap_count >= 1, "tap_count must be at least 1");
        let tree_width = tap_count.next_power_of_two();
        let config = Self {
            tap_count,
            tree_width,
            fractional_bits,
            accumulator_width: fixed::min_accumulator_width(tree_width),
            total_latency: 3 + tree_width.trailing_zeros() as usize,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check all structural invariants.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tap_count >= 1, "tap_count must be at least 1");
        ensure!(
            self.tree_width.is_power_of_two(),
            "tree_width {} is not a power of two",
            self.tree_width
        );
        ensure!(
            self.tree_width >= self.tap_count,
            "tree_width {} cannot hold {} taps",
            self.tree_width,
            self.tap_count
        );
        ensure!(
            self.fractional_bits <= 15,
            "fractional_bits {} exceeds the 15 fraction bits of a Q1.15 word",
            self.fractional_bits
        );
        let min_acc = fixed::min_accumulator_width(self.tree_width);
        ensure!(
            self.accumulator_width >= min_acc,
            "accumulator_width {} cannot hold a sum of {} products ({} bits needed)",
            self.accumulator_width,
            self.tree_width,
            min_acc
        );
        ensure!(
            self.accumulator_width <= 64,
            "accumulator_width {} exceeds the 64-bit model limit",
            self.accumulator_width
        );
        let expected_latency = 3 + self.tree_levels();
        ensure!(
            self.total_latency == expected_latency,
            "total_latency {} does not match the pipeline depth {}",
            self.total_latency,
            expected_latency
        );
        Ok(())
    }

    /// Number of adder tree levels (zero for a single-lane tree).
    pub fn tree_levels(&self) -> usize {
        self.tree_width.trailing_zeros() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::FilterConfig;

    #[test]
    fn derives_from_tap_count() {
        let c = FilterConfig::for_taps(4, 0).unwrap();
        assert_eq!(c.tree_width, 4);
        assert_eq!(c.total_latency, 5);
        assert_eq!(c.accumulator_width, 34);

        let c = FilterConfig::for_taps(121, 15).unwrap();
        assert_eq!(c.tree_width, 128);
        assert_eq!(c.total_latency, 10);
        assert_eq!(c.accumulator_width, 39);

        let c = FilterConfig::for_taps(1, 15).unwrap();
        assert_eq!(c.tree_width, 1);
        assert_eq!(c.tree_levels(), 0);
        assert_eq!(c.total_latency, 3);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(FilterConfig::for_taps(0, 0).is_err());
        assert!(FilterConfig::for_taps(4, 16).is_err());

        let good = FilterConfig::for_taps(4, 15).unwrap();
        assert!(FilterConfig {
            tree_width: 6,
            ..good
        }
        .validate()
        .is_err());
        assert!(FilterConfig {
            tree_width: 2,
            ..good
        }
        .validate()
        .is_err());
        assert!(FilterConfig {
            accumulator_width: 33,
            ..good
        }
        .validate()
        .is_err());
        assert!(FilterConfig {
            accumulator_width: 65,
            ..good
        }
        .validate()
        .is_err());
        assert!(FilterConfig {
            total_latency: 4,
            ..good
        }
        .validate()
        .is_err());
    }
}
