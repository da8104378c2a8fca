use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

/// With two paths the first is a JUnit XML file converted once; with a single
/// path the runner output is read from stdin and the report at that path is
/// republished every second until the stream ends.
#[derive(StructOpt, Debug)]
#[structopt(name = CARGO_PKG_NAME)]
pub struct Opt {
    /// Input JUnit XML file, or the output file when reading from stdin
    #[structopt(parse(from_os_str))]
    pub input: PathBuf,

    /// Output HTML file
    #[structopt(parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Open the output file in the default viewer after rendering
    #[structopt(long)]
    pub open: bool,

    /// Value for the go.version suite property, defaults to $GOVERSION
    #[structopt(long)]
    pub go_version: Option<String>,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE")]
    pub log_output_file: Option<PathBuf>,
}

impl Into<LevelFilter> for LogLevel {
    fn into(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
