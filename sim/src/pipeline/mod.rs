//! The pipelined filter engine.
//!
//! Stages are an ordered rank of registers: capture, multiply, one rank per
//! adder tree level, rescale. Stage `k` consumes slot `k` of the control
//! chain, so the accept decision made at the input port reaches each stage
//! exactly when the sample it refers to does. A single downstream ready
//! gates the clock of everything at once; there is no per-stage skid
//! buffering, and backpressure is the upstream ready passed through.

pub(crate) mod control;
pub(crate) mod delay;
pub(crate) mod multiply;
pub(crate) mod scale;
pub(crate) mod tree;
pub(crate) mod valid;

use std::fmt;

use anyhow::{ensure, Result};

use crate::coeffs::CoeffTable;
use crate::config::FilterConfig;
use crate::framework::{ClockedSim, PortIn, PortOut};
use crate::utils::CYAN;

use control::{ShadowChain, StageCtl};
use delay::TapDelayLine;
use multiply::ProductBank;
use scale::OutputReg;
use tree::AdderTree;
use valid::ValidPipe;

/// All stage registers, as one latchable block.
#[derive(Debug, Clone)]
struct PipeRegs {
    window: TapDelayLine,
    products: ProductBank,
    tree: AdderTree,
    output: OutputReg,
}

impl PipeRegs {
    fn new(config: &FilterConfig) -> Self {
        Self {
            window: TapDelayLine::new(config.tap_count),
            products: ProductBank::new(config.tree_width),
            tree: AdderTree::new(config.tree_width),
            output: OutputReg::default(),
        }
    }
}

/// Cycle-accurate model of the filter pipeline.
///
/// Drive it one cycle at a time through [`ClockedSim::step`]. The register
/// state between two calls is exactly the state between two clock edges;
/// nothing inside advances on its own.
pub struct FirPipeline {
    config: FilterConfig,
    coeffs: CoeffTable,
    cur: PipeRegs,
    nex: PipeRegs,
    ctl: ShadowChain,
    tokens: ValidPipe,
    /// Whether the cycle being simulated could take an input word.
    in_ready: bool,
    /// Whether the pending edge latches anything.
    advance: bool,
    /// Port inputs of the cycle being simulated, kept for the trace line.
    trace_in: PortIn,
    /// Whether to print a state line per cycle.
    tty_out: bool,
    cycle_count: u64,
}

impl FirPipeline {
    /// Build an engine for `config` over `coeffs`.
    ///
    /// tty_out: whether to print a state line for every simulated cycle.
    pub fn new(config: FilterConfig, coeffs: CoeffTable, tty_out: bool) -> Result<Self> {
        config.validate()?;
        ensure!(
            coeffs.len() == config.tap_count,
            "coefficient table has {} entries for {} taps",
            coeffs.len(),
            config.tap_count
        );
        let cur = PipeRegs::new(&config);
        debug_assert_eq!(cur.tree.level_count(), config.tree_levels());
        Ok(Self {
            nex: cur.clone(),
            cur,
            ctl: ShadowChain::new(config.total_latency),
            tokens: ValidPipe::new(config.total_latency),
            in_ready: false,
            advance: false,
            trace_in: PortIn::default(),
            tty_out,
            cycle_count: 0,
            config,
            coeffs,
        })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Cycles from an accepted input to the cycle its output is presented.
    pub fn latency(&self) -> usize {
        self.config.total_latency
    }

    fn print_trace(&self) {
        let accept = self.trace_in.valid && self.trace_in.ready && !self.trace_in.reset;
        let s = CYAN;
        eprintln!(
            "cycle {s}{:05}{s:#}  in {:>6}{}  ctl [{}]  tok [{}]  out {:>6}{}",
            self.cycle_count,
            self.trace_in.sample,
            if accept { "*" } else { " " },
            self.ctl,
            self.tokens,
            self.cur.output.sample(),
            if self.tokens.emitted() { "v" } else { " " },
        );
    }
}

impl ClockedSim for FirPipeline {
    fn propagate_signals(&mut self, ports: PortIn) {
        let accept = ports.valid && ports.ready && !ports.reset;
        self.in_ready = ports.ready && !ports.reset;
        self.advance = ports.ready || ports.reset;
        self.trace_in = ports;

        // Control distribution for this cycle. Reset overrides a stalled
        // consumer; a pure stall freezes the chains along with the stages.
        if ports.reset {
            tracing::info!("master reset (cycle {})", self.cycle_count);
            self.ctl.advance(StageCtl::pulse());
            self.ctl.flush_enables();
            self.tokens.clear();
        } else if ports.ready {
            self.ctl.advance(if accept {
                StageCtl::accept()
            } else {
                StageCtl::default()
            });
            self.tokens.shift(accept);
        }

        if accept {
            tracing::debug!("accept sample {} (cycle {})", ports.sample, self.cycle_count);
        }

        if !self.advance {
            return;
        }
        self.nex.clone_from(&self.cur);

        let c = self.ctl.stage(0);
        if c.reset {
            self.nex.window.clear();
        } else if c.enable {
            self.nex.window.shift_in(ports.sample);
        }

        let c = self.ctl.stage(1);
        if c.reset {
            self.nex.products.clear();
        } else if c.enable {
            self.nex.products.latch_products(&self.cur.window, &self.coeffs);
        }

        for lvl in 0..self.config.tree_levels() {
            let c = self.ctl.stage(2 + lvl);
            if c.reset {
                self.nex.tree.clear_level(lvl);
            } else if c.enable {
                self.nex.tree.latch_level(
                    lvl,
                    &self.cur.products,
                    &self.cur.tree,
                    self.config.accumulator_width,
                );
            }
        }

        let c = self.ctl.stage(self.config.total_latency - 1);
        debug_assert_eq!(
            c.enable,
            self.tokens.emitted(),
            "control chain and valid tokens disagree at the output stage"
        );
        if c.reset {
            self.nex.output.clear();
        } else if c.enable {
            let root = self.cur.tree.root(&self.cur.products);
            self.nex
                .output
                .latch_scaled(root, self.config.fractional_bits);
            tracing::debug!(
                "emit {} (cycle {})",
                self.nex.output.sample(),
                self.cycle_count
            );
        }
    }

    fn initiate_next_cycle(&mut self) {
        if self.advance {
            std::mem::swap(&mut self.cur, &mut self.nex);
        }
        if self.tty_out {
            self.print_trace();
        }
        self.cycle_count += 1;
    }

    fn port_state(&self) -> PortOut {
        PortOut {
            sample: self.cur.output.sample(),
            valid: self.tokens.emitted(),
            ready: self.in_ready,
        }
    }

    fn cycle_count(&self) -> u64 {
        self.cycle_count
    }
}

impl fmt::Display for FirPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "cycle {}  ({} taps, tree width {}, latency {})",
            self.cycle_count, self.config.tap_count, self.config.tree_width, self.latency()
        )?;
        writeln!(f, "ctl    [{}]", self.ctl)?;
        writeln!(f, "tokens [{}]  in flight: {}", self.tokens, self.tokens.any())?;
        writeln!(f, "newest sample {}", self.cur.window.newest())?;
        write!(
            f,
            "output {}{}",
            self.cur.output.sample(),
            if self.tokens.emitted() { " (valid)" } else { "" }
        )
    }
}
