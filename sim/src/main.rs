use anyhow::Result;
use fir_sim::framework::{ClockedSim, PortIn};
use fir_sim::verify::{diff_outputs, feed_samples_throttled};
use fir_sim::{samples, CoeffTable, FilterConfig, FirPipeline, ReferenceFir};
use simutils::{clap, verbose};

use clap::Parser;

// Cycle-accurate fixed-point FIR pipeline simulator
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    styles = simutils::get_styles(),
    arg_required_else_help = true,
)]
struct Args {
    /// Path to the input sample file (one signed 16-bit integer per line)
    input: String,

    /// Path to the coefficient file (`.hex` for hex words, decimal otherwise)
    #[arg(short, long)]
    coeffs: String,

    /// Output filename (`.csv` for n,input,output rows, samples otherwise)
    ///
    /// Without this option the output samples go to stdout.
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Bits shifted off in the final rescale
    #[arg(long, default_value_t = 15)]
    frac_bits: u32,

    /// Deassert the consumer-side ready on every Nth cycle
    #[arg(long)]
    stall_every: Option<u64>,

    /// Hold master reset for this many cycles before streaming
    #[arg(long, default_value_t = 0)]
    reset_cycles: u32,

    /// Check the outputs against the behavioral model
    #[arg(long)]
    compare: bool,

    /// Print a pipeline state line for every simulated cycle
    #[arg(long)]
    trace: bool,

    /// Print logs during simulation
    #[command(flatten)]
    verbose: verbose::Verbosity,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = simutils::verbose_level_to_trace(args.verbose.log_level());
    simutils::logging_setup(log_level, None::<&std::fs::File>);

    let coeffs = CoeffTable::load(&args.coeffs)?;
    let stream = samples::read_samples(&args.input)?;
    let config = FilterConfig::for_taps(coeffs.len(), args.frac_bits)?;

    let mut pipe = FirPipeline::new(config, coeffs.clone(), args.trace)?;
    for _ in 0..args.reset_cycles {
        pipe.step(PortIn::master_reset());
    }

    let outputs = feed_samples_throttled(&mut pipe, &stream, args.stall_every.unwrap_or(0))?;
    tracing::info!(
        "{} samples through {} taps in {} cycles",
        stream.len(),
        config.tap_count,
        pipe.cycle_count()
    );

    if args.compare {
        let expected = ReferenceFir::new(coeffs, args.frac_bits)?.run(&stream);
        diff_outputs(&expected, &outputs)?;
        eprintln!("outputs match the behavioral model ({} samples)", outputs.len());
    }

    match &args.output {
        Some(path) if path.ends_with(".csv") => {
            samples::write_csv(path, &stream, &outputs)?;
        }
        Some(path) => {
            samples::write_samples(path, &outputs)?;
        }
        None => {
            let mut stdout = String::with_capacity(outputs.len() * 7);
            for s in &outputs {
                stdout.push_str(&s.to_string());
                stdout.push('\n');
            }
            print!("{}", stdout);
        }
    }

    if args.trace {
        eprintln!("{}", pipe);
    }
    Ok(())
}
