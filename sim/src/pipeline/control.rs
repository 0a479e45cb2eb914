//! Per-stage control distribution.
//!
//! Every stage is clock-enabled, and the enable for stage `k` is the accept
//! decision delayed by `k` cycles, so a datum and its "process me" signal
//! travel down the pipeline together. Reset rides the same chain: a master
//! reset injects a one-cycle reset pulse at the head, and the pulse zeroes
//! one stage per cycle as it sweeps toward the output.

use std::fmt;

use crate::utils::{GRAY, GRN, REDB};

/// Control word consumed by one stage during one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCtl {
    /// Latch a freshly computed value at the closing edge.
    pub enable: bool,
    /// Zero the stage registers at the closing edge. Dominates `enable`.
    pub reset: bool,
}

impl StageCtl {
    pub fn accept() -> Self {
        Self {
            enable: true,
            reset: false,
        }
    }

    pub fn pulse() -> Self {
        Self {
            enable: false,
            reset: true,
        }
    }
}

/// The delayed control chain. Slot `k` holds the control word that stage
/// `k` consumes this cycle: slot 0 is the combinational head (this cycle's
/// decision), the tail slots are registers carrying older decisions.
#[derive(Debug, Clone)]
pub struct ShadowChain {
    slots: Vec<StageCtl>,
}

impl ShadowChain {
    pub fn new(depth: usize) -> Self {
        Self {
            slots: vec![StageCtl::default(); depth],
        }
    }

    /// Shift the chain by one cycle and install the new head word.
    pub fn advance(&mut self, head: StageCtl) {
        self.slots.rotate_right(1);
        self.slots[0] = head;
    }

    /// Drop the enable of every in-flight word. Reset pulses already in the
    /// chain survive, so a sweep that is under way still completes.
    pub fn flush_enables(&mut self) {
        for slot in &mut self.slots {
            slot.enable = false;
        }
    }

    pub fn stage(&self, k: usize) -> StageCtl {
        self.slots[k]
    }
}

impl fmt::Display for ShadowChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, ctl) in self.slots.iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            let (mark, s) = match (ctl.reset, ctl.enable) {
                (true, _) => ("R", REDB),
                (false, true) => ("E", GRN),
                (false, false) => ("-", GRAY),
            };
            write!(f, "{s}{mark}{s:#}")?;
        }
        Ok(())
    }
}
