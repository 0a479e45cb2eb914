//! The capture stage: a shift register holding the most recent samples.

/// Tap delay line. Slot 0 holds the newest sample, slot `taps - 1` the
/// oldest still in the window.
#[derive(Debug, Clone)]
pub struct TapDelayLine {
    buf: Vec<i16>,
}

impl TapDelayLine {
    pub fn new(tap_count: usize) -> Self {
        Self {
            buf: vec![0; tap_count],
        }
    }

    /// Capture a sample, pushing the oldest one out of the window.
    pub fn shift_in(&mut self, sample: i16) {
        self.buf.rotate_right(1);
        self.buf[0] = sample;
    }

    pub fn clear(&mut self) {
        self.buf.fill(0);
    }

    /// The window in multiply order: oldest sample first, so index `i`
    /// lines up with coefficient `i`.
    pub fn window_oldest_first(&self) -> impl Iterator<Item = i16> + '_ {
        self.buf.iter().rev().copied()
    }

    pub fn newest(&self) -> i16 {
        self.buf[0]
    }
}
