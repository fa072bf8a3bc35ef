//! CLI entry point for the PurpleAir report tool.
//!
//! Runs the interactive menu by default, or prints a single cross table with
//! the `report` subcommand.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use purple_air_report::{
    dataset::{Dataset, sample_readings},
    loader::load_readings,
    menu::Session,
    report::render_table,
    stats::Statistic,
};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "purple_air_report")]
#[command(about = "Summarize particulate readings by zip code and time of day", long_about = None)]
struct Cli {
    /// CSV file with zip code, reading time and concentration columns
    #[arg(
        short = 'f',
        long,
        global = true,
        env = "PURPLE_AIR_FILE",
        default_value = "./purple_air.csv"
    )]
    data_file: PathBuf,

    /// Menu header (at most 30 characters)
    #[arg(long, global = true, env = "PURPLE_AIR_HEADER")]
    header: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Interactive,
    /// Print one cross table and exit
    Report {
        /// Statistic shown in each cell
        #[arg(short, long, value_enum, default_value_t = Statistic::Avg)]
        stat: Statistic,

        /// Zip codes to leave out of the table
        #[arg(short = 'x', long, value_name = "ZIP")]
        exclude: Vec<String>,

        /// Use the built-in demonstration readings instead of the data file
        #[arg(long, default_value_t = false)]
        sample: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/purple_air.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("purple_air.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // The menu shares the terminal, so stderr stays quiet unless asked.
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            info!(data_file = %cli.data_file.display(), "Starting interactive session");
            let stdin = io::stdin();
            let mut session =
                Session::new(Dataset::new(), cli.data_file, stdin.lock(), io::stdout());
            session.run(cli.header)?;
        }
        Commands::Report {
            stat,
            exclude,
            sample,
        } => {
            let table = report(&cli.data_file, cli.header, stat, &exclude, sample)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(table.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Loads data, applies the exclusions and renders one table, preceded by the header if set.
#[tracing::instrument(skip(data_file, header, exclude), fields(data_file = %data_file.display()))]
fn report(
    data_file: &Path,
    header: Option<String>,
    stat: Statistic,
    exclude: &[String],
    sample: bool,
) -> Result<String> {
    let mut dataset = match header {
        Some(header) => Dataset::with_header(header).context("invalid header")?,
        None => Dataset::new(),
    };

    let readings = if sample {
        sample_readings()
    } else {
        load_readings(data_file)?
    };
    dataset.load(readings);

    for zip in exclude {
        dataset
            .set_zip_active(zip, false)
            .with_context(|| format!("cannot exclude {zip}"))?;
    }
    debug!(excluded = exclude.len(), "Exclusions applied");

    let mut out = String::new();
    if !dataset.header().is_empty() {
        out.push_str(dataset.header());
        out.push('\n');
    }
    out.push_str(&render_table(&dataset, stat)?);
    Ok(out)
}
