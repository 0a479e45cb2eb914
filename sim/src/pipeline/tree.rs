//! The adder tree: pairwise sums, one register rank per level.
//!
//! Level 0 halves the product rank, each further level halves again, so a
//! `tree_width` of `2^k` needs `k` levels and the root is a single node.
//! Node values are modeled in `i64` and checked against the configured
//! accumulator width as they are latched.

use crate::fixed;

use super::multiply::ProductBank;

#[derive(Debug, Clone)]
pub struct AdderTree {
    levels: Vec<Vec<i64>>,
}

impl AdderTree {
    pub fn new(tree_width: usize) -> Self {
        let mut levels = Vec::new();
        let mut width = tree_width;
        while width > 1 {
            width /= 2;
            levels.push(vec![0; width]);
        }
        Self { levels }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Latch level `lvl` from the registered rank below it. Level 0 reads
    /// the product bank; deeper levels read the previous tree level.
    pub fn latch_level(
        &mut self,
        lvl: usize,
        products: &ProductBank,
        below: &AdderTree,
        accumulator_width: u32,
    ) {
        for j in 0..self.levels[lvl].len() {
            let (a, b) = if lvl == 0 {
                let lanes = products.lanes();
                (i64::from(lanes[2 * j]), i64::from(lanes[2 * j + 1]))
            } else {
                let rank = &below.levels[lvl - 1];
                (rank[2 * j], rank[2 * j + 1])
            };
            let sum = a + b;
            debug_assert!(
                fixed::fits_signed(sum, accumulator_width),
                "node {j} of level {lvl} overflows {accumulator_width} bits"
            );
            self.levels[lvl][j] = sum;
        }
    }

    pub fn clear_level(&mut self, lvl: usize) {
        self.levels[lvl].fill(0);
    }

    /// The registered value feeding the rescale stage. With no levels the
    /// tree is a wire and the root is the single product lane.
    pub fn root(&self, products: &ProductBank) -> i64 {
        match self.levels.last() {
            Some(rank) => rank[0],
            None => i64::from(products.lanes()[0]),
        }
    }
}
