//! A minimal substrate for cycle-accurate simulation of clocked stream
//! hardware.
//!
//! During a clock cycle, the port inputs combine with the current register
//! values through the combinational logic; the results are latched into the
//! registers at the clock edge that ends the cycle. A simulator therefore
//! needs two basic operations: propagate signals, then latch the next cycle.

/// Input-side port values driven during one cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortIn {
    /// Sample word offered by the upstream producer.
    pub sample: i16,
    /// The offered sample is meaningful.
    pub valid: bool,
    /// The downstream consumer accepts an output word this cycle. Deasserting
    /// this freezes the whole engine.
    pub ready: bool,
    /// Master reset, effective on this cycle's closing edge.
    pub reset: bool,
}

impl PortIn {
    /// Offer a sample with the consumer ready.
    pub fn offer(sample: i16) -> Self {
        Self {
            sample,
            valid: true,
            ready: true,
            reset: false,
        }
    }

    /// No sample offered, consumer ready.
    pub fn idle() -> Self {
        Self {
            sample: 0,
            valid: false,
            ready: true,
            reset: false,
        }
    }

    /// Assert master reset for this cycle.
    pub fn master_reset() -> Self {
        Self {
            sample: 0,
            valid: false,
            ready: true,
            reset: true,
        }
    }

    pub fn with_ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }
}

/// Output-side port values observable during one cycle.
///
/// `sample` and `valid` come from registers, so they describe the cycle
/// after the edge that a [`ClockedSim::step`] call simulates. `ready`
/// echoes whether the engine could take an input word on that edge: a
/// producer uses it to decide whether its offered sample was consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortOut {
    pub sample: i16,
    pub valid: bool,
    pub ready: bool,
}

/// Two-phase simulation of a clocked circuit.
///
/// [`ClockedSim::propagate_signals`] runs the combinational logic, computing
/// every register's next value from the current values and the port inputs.
/// [`ClockedSim::initiate_next_cycle`] latches those values, simulating the
/// clock edge. Callers normally just use [`ClockedSim::step`].
pub trait ClockedSim {
    fn propagate_signals(&mut self, ports: PortIn);
    fn initiate_next_cycle(&mut self);

    /// Registered port state observable during the current cycle.
    fn port_state(&self) -> PortOut;

    /// Number of edges simulated so far.
    fn cycle_count(&self) -> u64;

    /// Simulate one full clock edge: drive `ports` during the cycle, close
    /// it, and return the port state of the following cycle.
    fn step(&mut self, ports: PortIn) -> PortOut {
        self.propagate_signals(ports);
        self.initiate_next_cycle();
        self.port_state()
    }
}
