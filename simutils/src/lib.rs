//! Shared glue for simulator binaries: argument parsing style, verbosity
//! flags and the tracing subscriber setup.

pub use clap;
pub use clap_verbosity_flag as verbose;

use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Help style shared by all binaries of this workspace.
pub fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .placeholder(AnsiColor::Cyan.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .invalid(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
}

/// Map the CLI verbosity flag to a tracing level. The default (no `-v`)
/// only lets errors through; each repetition opens up one more level.
pub fn verbose_level_to_trace(level: Option<verbose::Level>) -> &'static tracing::Level {
    match level {
        Some(verbose::Level::Error) => &tracing::Level::WARN,
        Some(verbose::Level::Warn) => &tracing::Level::INFO,
        Some(verbose::Level::Info) => &tracing::Level::DEBUG,
        Some(verbose::Level::Debug) => &tracing::Level::TRACE,
        Some(verbose::Level::Trace) => &tracing::Level::TRACE,
        None => &tracing::Level::ERROR,
    }
}

/// Install the global tracing subscriber.
///
/// With a log file, events are written to it as JSON lines (one object per
/// event). Without one, events go to stderr as plain compact text.
pub fn logging_setup(max_level: &tracing::Level, log_file: Option<&std::fs::File>) {
    match log_file {
        Some(f) => {
            let f = f.try_clone().expect("cannot duplicate log file handle");
            tracing_subscriber::fmt()
                .json()
                .with_max_level(*max_level)
                .with_writer(std::sync::Mutex::new(f))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .compact()
                .without_time()
                .with_max_level(*max_level)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
