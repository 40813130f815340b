//! `iostim` command line driver
//!
//! Usage:
//!   iostim script.v > trace.csv
//!   cat script.v | iostim --emit-c - > trace.txt

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use iostim::{compile, render, CompileError, Config};

#[derive(Parser, Debug)]
#[command(
    name = "iostim",
    version,
    about = "Compile write_io/repeat/for stimulus scripts into IO/INFO event lines"
)]
struct Cli {
    /// Input script; `-` or absent reads standard input
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Emit a compact C loop for loops above the expansion threshold
    #[arg(long = "emit-c")]
    emit_c: bool,

    /// Iteration count above which loops may be compacted
    #[arg(long, value_name = "N")]
    threshold: Option<u64>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write events to FILE instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn build_config(&self) -> Result<Config, CompileError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if self.emit_c {
            config.allow_compact = true;
        }
        if let Some(threshold) = self.threshold {
            config.expand_threshold = threshold;
        }
        Ok(config)
    }
}

fn read_input(input: Option<&Path>) -> Result<String, CompileError> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| CompileError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|source| CompileError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(source)
        }
    }
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CompileError> {
    match output {
        Some(path) => fs::write(path, text).map_err(|source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| CompileError::Io {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}

/// Returns the number of events written.
fn run(cli: &Cli) -> Result<usize, CompileError> {
    let config = cli.build_config()?;
    let source = read_input(cli.input.as_deref())?;
    let events = compile(&source, &config)?;
    write_output(cli.output.as_deref(), &render(&events))?;
    Ok(events.len())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level()).init() {
        eprintln!("warning: failed to initialize logger: {}", e);
    }

    match run(&cli) {
        Ok(0) => {
            eprintln!("error: no events produced");
            ExitCode::FAILURE
        }
        Ok(count) => {
            info!("wrote {} events", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            if let Some(context) = e.context() {
                eprintln!("{}", context);
            }
            ExitCode::FAILURE
        }
    }
}
