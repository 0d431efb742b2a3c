//! CLI: reads a saved P&L response and writes the report in the chosen
//! formats.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use equity_pl_report::{
    ClientContext, ColumnSet, ExportFormat, Exporter, FinancialYear, JsonFileSource,
    ReportBuilder, ReportConfig, ReportError, ReportKind, ReportPeriod, fetch_rows, parse_date,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Kind {
    Equity,
    Summarized,
}

impl From<Kind> for ReportKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Equity => Self::Equity,
            Kind::Summarized => Self::Summarized,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    Csv,
    Xlsx,
    Pdf,
    All,
}

impl Fmt {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            Self::Csv => vec![ExportFormat::Csv],
            Self::Xlsx => vec![ExportFormat::Xlsx],
            Self::Pdf => vec![ExportFormat::Pdf],
            Self::All => ExportFormat::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "equity-pl-report", version, about = "Exports broker P&L reports")]
struct Cli {
    /// Saved response of the P&L endpoint (JSON)
    file: PathBuf,

    /// Report the response belongs to
    #[arg(long, value_enum, default_value = "equity")]
    kind: Kind,

    /// Output format
    #[arg(short, long, value_enum, default_value = "all")]
    format: Fmt,

    /// Client name printed in the letterhead
    #[arg(long, default_value = "")]
    client_name: String,

    /// Client code printed in the letterhead
    #[arg(long, default_value = "")]
    client_id: String,

    /// Financial year, e.g. 2024-2025 (default: the current one)
    #[arg(long)]
    year: Option<String>,

    /// Last day of the period, dd/mm/yyyy or yyyy-mm-dd (default: 31 March)
    #[arg(long)]
    to_date: Option<String>,

    /// Column to hide (repeatable)
    #[arg(long = "hide", value_name = "COLUMN")]
    hide: Vec<String>,

    /// Column to show (repeatable)
    #[arg(long = "show", value_name = "COLUMN")]
    show: Vec<String>,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (default: `output_dir` from the settings)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ReportError>() {
            Some(ReportError::SessionExpired) => {
                eprintln!("Session expired, please sign in again.");
                ExitCode::from(3)
            }
            Some(ReportError::Fetch(message)) => {
                eprintln!("Failed to fetch the report: {message}");
                ExitCode::from(2)
            }
            _ => {
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ReportConfig::default(),
    };

    let year = match &cli.year {
        Some(label) => label.parse::<FinancialYear>()?,
        None => FinancialYear::containing(Utc::now().date_naive()),
    };
    let period = match &cli.to_date {
        Some(date) => ReportPeriod::new(year, parse_date(date)?)?,
        None => ReportPeriod::full_year(year)?,
    };

    let kind = ReportKind::from(cli.kind);
    let fetched = fetch_rows(&JsonFileSource::new(&cli.file), &period)?;
    let report = ReportBuilder::new(&fetched).kind(kind).build();

    let mut columns = ColumnSet::for_kind(kind);
    for id in &cli.show {
        columns.set_visible(id, true)?;
    }
    for id in &cli.hide {
        columns.set_visible(id, false)?;
    }

    let client = ClientContext {
        client_name: cli.client_name,
        client_id: cli.client_id,
    };
    let context = config.context(client, period);
    let exporter = Exporter::new(&report, &columns, &context).with_pdf_config(config.pdf.clone());

    let out = cli.out.unwrap_or(config.output_dir);
    fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;

    let now = Utc::now();
    for format in cli.format.formats() {
        let path = exporter.export_as(format, &out, now)?;
        println!("{}", path.display());
    }
    Ok(())
}
