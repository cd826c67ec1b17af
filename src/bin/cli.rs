//! stationpref CLI
//!
//! Logs into the portal and, depending on the flags, submits the local
//! preferences file, regenerates it from the station list, or writes a ranked
//! suggestion with hypergen.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stationpref::{
    error::{AppError, Result},
    models::{Config, Credentials},
    pipeline,
    storage::LocalStorage,
};

/// stationpref - Practice School station preference tool
#[derive(Parser, Debug)]
#[command(
    name = "stationpref",
    version,
    about = "Validate and submit station preferences to the PSD portal"
)]
struct Cli {
    /// Path to the settings file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "stationpref.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate a new default station list
    #[arg(short, long, conflicts_with = "hypergen")]
    generate: bool,

    /// With --generate, overwrite the stations file without prompting
    #[arg(short = 'y', long, requires = "generate")]
    yes: bool,

    /// Generate a new station list using hypergen
    #[arg(long)]
    hypergen: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Ask until the user accepts overwriting `path` or names a file that does not
/// exist yet. Blank file names are asked for again.
fn confirm_output<R: BufRead, W: Write>(
    mut path: PathBuf,
    input: R,
    mut output: W,
) -> Result<PathBuf> {
    let mut lines = input.lines();
    let mut prompt = |question: &str| -> Result<String> {
        write!(output, "{question}")?;
        output.flush()?;
        match lines.next() {
            Some(line) => Ok(line?.trim().to_string()),
            None => Err(AppError::config("no answer given on stdin")),
        }
    };

    while path.exists() {
        let answer = prompt(&format!(
            "The file {} already exists. Overwrite (y/n)? ",
            path.display()
        ))?;
        match answer.as_str() {
            "y" => break,
            "n" => loop {
                let name = prompt("Then what file do you want to write to? ")?;
                if !name.is_empty() {
                    path = PathBuf::from(name);
                    break;
                }
            },
            _ => continue,
        }
    }
    Ok(path)
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;
    config.validate()?;
    log::debug!("Portal root: {}", config.portal.root_url);

    let storage = LocalStorage::new(config.paths.clone());

    log::info!("Loading user credentials...");
    let credentials = Credentials::load(storage.credentials_path())?;

    if cli.generate {
        let output = if cli.yes {
            storage.stations_path()
        } else {
            confirm_output(storage.stations_path(), io::stdin().lock(), io::stdout())?
        };
        let session = pipeline::login(&config, &credentials).await?;
        return pipeline::run_generate(&config, &storage, &session, &output).await;
    }

    let session = pipeline::login(&config, &credentials).await?;
    if cli.hypergen {
        pipeline::run_hypergen(&config, &storage, &session).await
    } else {
        pipeline::run_submit(&config, &storage, &session, &credentials).await
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => {
            log::info!("Done!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
