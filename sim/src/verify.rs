//! Drive sample streams through an engine and compare output streams.

use anyhow::{bail, ensure, Result};

use crate::framework::{ClockedSim, PortIn, PortOut};

/// Feed `samples` through `sim` with the consumer always ready, then keep
/// clocking idle cycles until every accepted sample has produced its output
/// word. Returns the outputs in order, one per input.
pub fn feed_samples<S>(sim: &mut S, samples: &[i16]) -> Result<Vec<i16>>
where
    S: ClockedSim,
{
    run_stream(sim, samples, 0)
}

/// Like [`feed_samples`], but deassert the consumer ready on every
/// `stall_every`-th cycle (0 never stalls). Outputs must not depend on the
/// stall pattern; only the cycles they appear in do.
pub fn feed_samples_throttled<S>(
    sim: &mut S,
    samples: &[i16],
    stall_every: u64,
) -> Result<Vec<i16>>
where
    S: ClockedSim,
{
    run_stream(sim, samples, stall_every)
}

fn run_stream<S>(sim: &mut S, samples: &[i16], stall_every: u64) -> Result<Vec<i16>>
where
    S: ClockedSim,
{
    ensure!(
        stall_every != 1,
        "stall_every 1 deasserts ready on every cycle; nothing can move"
    );
    let mut collected = Vec::with_capacity(samples.len());
    let mut offered = 0usize;
    let limit = sim.cycle_count() + samples.len() as u64 * 4 + 1024;

    while collected.len() < samples.len() {
        let tick = sim.cycle_count();
        let ready = !(stall_every != 0 && (tick + 1) % stall_every == 0);

        // a word presented during this cycle transfers on its closing edge
        let presented: PortOut = sim.port_state();
        if presented.valid && ready {
            collected.push(presented.sample);
        }

        let inp = if offered < samples.len() {
            PortIn::offer(samples[offered]).with_ready(ready)
        } else {
            PortIn::idle().with_ready(ready)
        };
        let out = sim.step(inp);
        if inp.valid && out.ready {
            offered += 1;
        }

        if sim.cycle_count() > limit {
            bail!(
                "no progress after {} cycles: {} of {} outputs seen",
                sim.cycle_count(),
                collected.len(),
                samples.len()
            );
        }
    }
    Ok(collected)
}

/// Compare two output streams, reporting the mismatching positions the way
/// a memory diff does. Errors if the streams differ.
pub fn diff_outputs(expected: &[i16], got: &[i16]) -> Result<()> {
    use ansi_term::Colour::{Green, Red};

    if expected.len() != got.len() {
        bail!(
            "output length mismatch: expected {}, got {}",
            expected.len(),
            got.len()
        );
    }

    let mut mismatches = 0usize;
    for (n, (e, g)) in expected.iter().zip(got).enumerate() {
        if e != g {
            if mismatches < 16 {
                eprintln!(
                    "{:6}: {} -> {}",
                    n,
                    Green.paint(e.to_string()),
                    Red.bold().paint(g.to_string())
                );
            }
            mismatches += 1;
        }
    }
    if mismatches > 0 {
        bail!("{} of {} outputs mismatch", mismatches, expected.len());
    }
    Ok(())
}
