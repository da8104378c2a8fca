extern crate chrono;
extern crate lazy_static;
extern crate serde_derive;

#[macro_use]
extern crate log;

mod configuration;
mod report;
mod runner;

use log::LevelFilter;
use signal_hook::{iterator::Signals, SIGINT};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};
use std::sync::Arc;
use std::time::Duration;
use std::{fs, thread};
use structopt::StructOpt;

use self::configuration::command_line::{LogLevel, Opt};
use self::configuration::constants::report::REFRESH_FROZEN;
use self::report::error::Error;
use self::report::publish::{publish, LiveReporter};
use self::report::render::Renderer;
use self::runner::RunState;

fn main() {
    let options = Opt::from_args();
    let signals = Signals::new(&[SIGINT]).unwrap();

    thread::spawn(move || {
        for sig in signals.forever() {
            info!("Received signal {:?}, stopping", sig);
            exit(0);
        }
    });

    init_logging(
        options.logging.unwrap_or(LogLevel::Info).into(),
        &options.log_output_file,
    );

    match &options.output {
        Some(output) => {
            info!(
                "Converting {} into {}",
                options.input.display(),
                output.display()
            );
            let data = match fs::read_to_string(&options.input) {
                Ok(data) => data,
                Err(e) => {
                    error!("Failed to read {}: {}", options.input.display(), e);
                    exit(1);
                }
            };
            if let Err(e) = convert(&data, &options.input, output) {
                error!("Convert failed: {}", e);
                exit(1);
            }
            info!("Convert success");
            if options.open {
                open_in_viewer(output);
            }
        }
        None => {
            let output = options.input.clone();
            if let Err(e) = watch(output, options.open, options.go_version.clone()) {
                error!("Live report failed: {}", e);
                exit(1);
            }
        }
    }
}

/// Static mode: one decode, one render, one atomic write.
fn convert(data: &str, input: &Path, output: &Path) -> Result<(), Error> {
    let report = report::ingest::from_xml(data)?;
    let html = Renderer::new()?.render(&report, &input.display().to_string(), REFRESH_FROZEN)?;
    publish(output, &html)
}

/// Live mode: a background thread consumes runner output from stdin while
/// the publication loop republishes the report until the stream ends.
fn watch(output: PathBuf, open: bool, go_version: Option<String>) -> Result<(), Error> {
    let state = Arc::new(RunState::new());

    let parser_state = Arc::clone(&state);
    thread::spawn(move || {
        let stdin = io::stdin();
        match runner::parse::consume(stdin.lock(), &parser_state) {
            Ok(()) => info!("Runner output ended, finishing report"),
            Err(e) => {
                error!("Failed to read runner output: {}", e);
                exit(1);
            }
        }
    });

    if open {
        let path = output.clone();
        thread::spawn(move || {
            // give the first tick a chance to publish something to look at
            thread::sleep(Duration::from_secs(1));
            open_in_viewer(&path);
        });
    }

    LiveReporter::new(state, output)
        .with_go_version(go_version)
        .run()
}

fn open_in_viewer(path: &Path) {
    #[cfg(target_os = "macos")]
    const OPENER: &str = "open";
    #[cfg(not(target_os = "macos"))]
    const OPENER: &str = "xdg-open";

    if let Err(e) = Command::new(OPENER).arg(path).status() {
        warn!("Failed to open {}: {}", path.display(), e);
    }
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file).unwrap())
    }
    dispatcher.apply().unwrap();
    info!("Logging level {} enabled", level);
}
