//! Output-valid token pipe.
//!
//! One boolean per pipeline stage, shifted in lockstep with the data
//! registers. A token enters when the input handshake accepts a sample
//! and surfaces on the output port exactly `depth` ticks later.

use std::fmt;

use crate::utils::{GRAY, GRNB};

#[derive(Debug, Clone)]
pub struct ValidPipe {
    /// `tokens[k]` tells whether stage `k` holds a live sample.
    tokens: Vec<bool>,
}

impl ValidPipe {
    pub fn new(depth: usize) -> Self {
        Self {
            tokens: vec![false; depth],
        }
    }

    /// Advance every token one stage and admit `accepted` at the head.
    pub fn shift(&mut self, accepted: bool) {
        self.tokens.rotate_right(1);
        self.tokens[0] = accepted;
    }

    /// Drop every in-flight token. Used on reset.
    pub fn clear(&mut self) {
        self.tokens.fill(false);
    }

    /// Token of the last stage: the output register holds a live result.
    pub fn emitted(&self) -> bool {
        *self.tokens.last().unwrap_or(&false)
    }

    /// Any sample still in flight?
    pub fn any(&self) -> bool {
        self.tokens.iter().any(|t| *t)
    }
}

impl fmt::Display for ValidPipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, t) in self.tokens.iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            if *t {
                write!(f, "{GRNB}1{GRNB:#}")?;
            } else {
                write!(f, "{GRAY}0{GRAY:#}")?;
            }
        }
        Ok(())
    }
}
