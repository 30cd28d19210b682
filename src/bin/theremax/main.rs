//! theremax - draw in the terminal to play, hear it loop
//!
//! Run with: cargo run -- --loop-secs 8 --instrument fm

mod app;
mod ui;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};

use app::App;
use theremax::{InstrumentKind, TheremaxConfig};

#[derive(Parser)]
#[command(name = "theremax")]
#[command(about = "Record mouse gestures as sound and replay them on a loop", long_about = None)]
struct Args {
    /// Loop length in seconds
    #[arg(short, long, default_value = "10")]
    loop_secs: f64,

    /// Instrument for new gestures (theremin, synth, am, fm, duo, ...)
    #[arg(short, long, default_value = "theremin")]
    instrument: InstrumentKind,

    /// Log file (the terminal is taken by the UI)
    #[arg(long, default_value = "theremax.log")]
    log_file: PathBuf,

    /// Size of the voice pool
    #[arg(long, default_value = "16")]
    voices: usize,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .wrap_err_with(|| format!("failed to create log file {}", args.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let loop_length = Duration::try_from_secs_f64(args.loop_secs)
        .wrap_err_with(|| format!("invalid loop length {}", args.loop_secs))?;
    if loop_length.is_zero() {
        return Err(eyre!("loop length must be positive"));
    }
    let config = TheremaxConfig::new().loop_length(loop_length);

    App::new(config, args.instrument, args.voices).run()
}
