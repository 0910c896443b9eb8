use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;

use pla_rs::complete::{Completer, CompletionConfig, DEFAULT_MAX_INPUT_WIDTH};
use pla_rs::pla::{completed_path, ParseOptions, Pla};

/// Complete a partially specified PLA truth table over its full input space.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Input PLA file.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (`-` for stdout). Defaults to `<name>_complete.pla` next to the input.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Largest accepted input width.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_MAX_INPUT_WIDTH)]
    max_width: usize,

    /// Fail on overlapping rows with conflicting outputs.
    #[arg(long)]
    strict: bool,

    /// Keep the first `.ilb`/`.olb` line instead of rejecting repeats.
    #[arg(long)]
    tolerate_duplicate_labels: bool,

    /// Log level.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for simplelog::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => simplelog::LevelFilter::Off,
            LogLevel::Error => simplelog::LevelFilter::Error,
            LogLevel::Warn => simplelog::LevelFilter::Warn,
            LogLevel::Info => simplelog::LevelFilter::Info,
            LogLevel::Debug => simplelog::LevelFilter::Debug,
            LogLevel::Trace => simplelog::LevelFilter::Trace,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level.into(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let options = ParseOptions::default().with_tolerate_duplicate_labels(args.tolerate_duplicate_labels);
    let config = CompletionConfig::default()
        .with_max_input_width(args.max_width)
        .with_strict(args.strict);

    let pla = Pla::load(&args.input, &options)?;
    info!(
        "{}: .i {} .o {}, {} rows",
        args.input.display(),
        pla.input_width,
        pla.output_width,
        pla.rows.len()
    );

    let completed = pla.complete(&Completer::new(config))?;

    match args.output {
        Some(path) if path.as_os_str() == "-" => completed.write_to(std::io::stdout().lock())?,
        output => {
            let path = output.unwrap_or_else(|| completed_path(&args.input));
            completed.save(&path)?;
            info!("wrote {} rows to {}", completed.rows.len(), path.display());
        }
    }

    info!("done in {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
