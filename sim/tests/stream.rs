// End-to-end handshake, latency and reset behavior of the filter pipeline.

use anyhow::{ensure, Result};
use fir_sim::framework::{ClockedSim, PortIn};
use fir_sim::verify::{feed_samples, feed_samples_throttled};
use fir_sim::{CoeffTable, FilterConfig, FirPipeline, ReferenceFir};

fn engine(taps: &[i16], frac: u32) -> Result<FirPipeline> {
    let config = FilterConfig::for_taps(taps.len(), frac)?;
    FirPipeline::new(config, CoeffTable::new(taps.to_vec())?, false)
}

fn xorshift(state: &mut u32) -> u32 {
    *state ^= *state << 13;
    *state ^= *state >> 17;
    *state ^= *state << 5;
    *state
}

#[test]
fn running_sum_cycle_by_cycle() -> Result<()> {
    let mut pipe = engine(&[1, 1, 1, 1], 0)?;
    let latency = pipe.latency();
    assert_eq!(latency, 5);

    let inputs = [1i16, 2, 3, 4, 0, 0, 0];
    let expected = [1i16, 3, 6, 10, 9, 7, 4];
    let mut got = Vec::new();

    for (call, x) in inputs.iter().enumerate() {
        let out = pipe.step(PortIn::offer(*x));
        assert_eq!(out.valid, call >= latency - 1, "call {call}");
        assert!(out.ready);
        if out.valid {
            got.push(out.sample);
        }
    }
    for _ in 0..expected.len() - got.len() {
        let out = pipe.step(PortIn::idle());
        ensure!(out.valid, "drain starved");
        got.push(out.sample);
    }
    assert_eq!(got, expected);
    Ok(())
}

#[test]
fn first_output_arrives_after_the_pipeline_depth() -> Result<()> {
    for tap_count in [1usize, 3, 4, 121] {
        let taps = vec![1i16; tap_count];
        let mut pipe = engine(&taps, 0)?;
        let latency = pipe.latency();
        for call in 0..latency - 1 {
            ensure!(
                !pipe.step(PortIn::offer(1)).valid,
                "{tap_count} taps: valid too early at call {call}"
            );
        }
        let out = pipe.step(PortIn::offer(1));
        ensure!(out.valid, "{tap_count} taps: no output at call {}", latency - 1);
        // only the first sample is in the window at that point
        ensure!(out.sample == 1, "{tap_count} taps: first word {}", out.sample);
    }
    Ok(())
}

#[test]
fn impulse_reproduces_reversed_taps() -> Result<()> {
    let taps = vec![3i16, -7, 11, 23, -31];
    let expected: Vec<i16> = taps.iter().rev().copied().collect();

    let mut stream = vec![0i16; taps.len()];
    stream[0] = 1;
    let got = feed_samples(&mut engine(&taps, 0)?, &stream)?;
    assert_eq!(got, expected);

    // amplitude 2^14 against 14 fractional bits scales back to the taps
    stream[0] = 1 << 14;
    let got = feed_samples(&mut engine(&taps, 14)?, &stream)?;
    assert_eq!(got, expected);
    Ok(())
}

#[test]
fn output_holds_during_a_stall() -> Result<()> {
    let mut pipe = engine(&[1, 1], 0)?;
    let latency = pipe.latency();

    let mut out = pipe.step(PortIn::offer(5));
    for _ in 1..latency {
        out = pipe.step(PortIn::idle());
    }
    assert!(out.valid);
    assert_eq!(out.sample, 5);

    // everything freezes, the word stays presented
    for _ in 0..3 {
        let frozen = pipe.step(PortIn::idle().with_ready(false));
        assert!(frozen.valid);
        assert_eq!(frozen.sample, 5);
        assert!(!frozen.ready);
    }

    // consumed on the next ready cycle, nothing following it
    let after = pipe.step(PortIn::idle());
    assert!(!after.valid);
    Ok(())
}

#[test]
fn reset_discards_in_flight_results() -> Result<()> {
    let taps = vec![2i16, -3, 5, 7];
    let mut pipe = engine(&taps, 0)?;
    for x in [10, 20] {
        pipe.step(PortIn::offer(x));
    }

    let out = pipe.step(PortIn::master_reset());
    ensure!(!out.valid && !out.ready, "reset must clear the ports");

    // the stream that follows behaves as if the engine were fresh
    let stream: Vec<i16> = (0..30).map(|i| (i * 13 - 40) as i16).collect();
    let got = feed_samples(&mut pipe, &stream)?;
    let expected = ReferenceFir::new(CoeffTable::new(taps)?, 0)?.run(&stream);
    assert_eq!(got, expected);
    Ok(())
}

#[test]
fn reset_works_while_stalled_and_held() -> Result<()> {
    let taps = vec![1i16, 2, 3];
    let mut pipe = engine(&taps, 0)?;
    for x in [5, 6, 7, 8] {
        pipe.step(PortIn::offer(x));
    }
    let presented = pipe.step(PortIn::idle());
    ensure!(presented.valid, "pipeline should have filled");

    // park the presented word under a stall, then reset under that stall
    let held = pipe.step(PortIn::idle().with_ready(false));
    ensure!(held.valid && held.sample == presented.sample, "stall must hold");
    let out = pipe.step(PortIn::master_reset().with_ready(false));
    ensure!(!out.valid, "reset overrides the stall");

    // hold reset a few more cycles, as a power-on sequence does
    for _ in 0..4 {
        pipe.step(PortIn::master_reset());
    }

    let stream = [100i16, -100, 50, 0, 0, 25];
    let got = feed_samples(&mut pipe, &stream)?;
    let expected = ReferenceFir::new(CoeffTable::new(taps)?, 0)?.run(&stream);
    assert_eq!(got, expected);
    Ok(())
}

#[test]
fn zero_taps_zero_outputs_on_the_accept_cadence() -> Result<()> {
    let mut pipe = engine(&[0i16; 6], 15)?;
    let latency = pipe.latency();
    let mut rng = 0x00c0_ffeeu32;
    let mut accepts = Vec::new();
    let mut valids = Vec::new();

    for i in 0..64i16 {
        let offer = xorshift(&mut rng) % 4 != 0;
        let inp = if offer {
            PortIn::offer(i * 17 - 99)
        } else {
            PortIn::idle()
        };
        let out = pipe.step(inp);
        accepts.push(offer);
        valids.push(out.valid);
        if out.valid {
            ensure!(out.sample == 0, "nonzero word from a zero table");
        }
    }

    // the valid pattern is the accept pattern delayed by the latency
    for (i, v) in valids.iter().enumerate() {
        let expected = i + 1 >= latency && accepts[i + 1 - latency];
        ensure!(*v == expected, "wrong valid at call {i}");
    }
    Ok(())
}

#[test]
fn random_streams_match_the_model() -> Result<()> {
    let mut rng = 0x9e37_79b9u32;
    for tap_count in [1usize, 3, 4, 7, 8, 121] {
        let taps: Vec<i16> = (0..tap_count)
            .map(|_| (xorshift(&mut rng) >> 16) as i16)
            .collect();
        let stream: Vec<i16> = (0..200)
            .map(|_| (xorshift(&mut rng) >> 16) as i16)
            .collect();
        let expected = ReferenceFir::new(CoeffTable::new(taps.clone())?, 15)?.run(&stream);

        let got = feed_samples(&mut engine(&taps, 15)?, &stream)?;
        ensure!(got == expected, "plain stream, {tap_count} taps");

        let got = feed_samples_throttled(&mut engine(&taps, 15)?, &stream, 3)?;
        ensure!(got == expected, "throttled stream, {tap_count} taps");
    }
    Ok(())
}

#[test]
fn hex_table_drives_the_engine() -> Result<()> {
    use std::io::Write;

    let mut f = tempfile::Builder::new().suffix(".hex").tempfile()?;
    writeln!(f, "// band-pass taps")?;
    for word in ["0400", "F000", "7FFF", "8000"] {
        writeln!(f, "{word}")?;
    }
    let path = f.into_temp_path();

    let coeffs = CoeffTable::load(&path)?;
    let config = FilterConfig::for_taps(coeffs.len(), 15)?;
    let mut pipe = FirPipeline::new(config, coeffs.clone(), false)?;

    let stream = [16384i16, -16384, 8192, 0, 0, 0];
    let got = feed_samples(&mut pipe, &stream)?;
    let expected = ReferenceFir::new(coeffs, 15)?.run(&stream);
    assert_eq!(got, expected);
    Ok(())
}
