use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "companies.csv";
pub const DEFAULT_OUTPUT: &str = "output.csv";
pub const DEFAULT_LOG_FILE: &str = "contact_enricher.log";

#[derive(Parser, Debug)]
#[command(name = "contact-enricher")]
#[command(about = "Find executive contacts for companies via Apollo people search")]
#[command(version)]
pub struct Cli {
    /// Input CSV or Excel file with a company name column
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output CSV file (one row per contact)
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Persistent log file, appended to on every run
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Only process the first N companies
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Look up a single company name or domain and print its contacts instead of writing CSV
    #[arg(long, value_name = "NAME_OR_DOMAIN")]
    pub company: Option<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
