//! CLI entry point for the CLA grade report.
//!
//! Provides subcommands for printing the grade dashboard once, listing the
//! available filters, and an interactive viewer that re-runs the pipeline on
//! every command the way the web dashboard re-renders on every click.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cla_grades::{
    analyzers::dashboard::{Dashboard, Selection},
    analyzers::{clean::clean, filter::FilterOptions},
    config::Secrets,
    infra::sheets::{SheetAuth, SheetClient, is_remote},
    output::{export_dashboard, print_pretty, render_filter_options, render_tables, to_json},
    services::{CachedSource, FileSource, RecordSource},
    session::Session,
};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cla_grades")]
#[command(about = "Grade statistics for the CLA programming groups", long_about = None)]
struct Cli {
    /// JSON secrets file; falls back to CLA_* environment variables
    #[arg(long, global = true)]
    secrets: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Path to a CSV/JSON export or a sheet URL (defaults to the configured sheet)
    #[arg(value_name = "FILE_OR_URL")]
    source: Option<String>,

    /// Password unlocking the private sheet
    #[arg(short, long)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grade dashboard
    Report {
        #[command(flatten)]
        source: SourceArgs,

        /// Only include these homeworks (comma separated, default all)
        #[arg(long, value_delimiter = ',')]
        homework: Vec<String>,

        /// Only include these groups (comma separated, default all)
        #[arg(long, value_delimiter = ',')]
        group: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Also write every table as CSV into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// List the homework and group identifiers available for filtering
    Filters {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Interactive viewer reading commands from stdin
    View {
        /// Path to a CSV/JSON export or a sheet URL (defaults to the configured sheet)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/cla_grades.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cla_grades.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

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
    let secrets = match &cli.secrets {
        Some(path) => Secrets::load(path)?,
        None => Secrets::from_env()?,
    };

    match cli.command {
        Commands::Report {
            source,
            homework,
            group,
            format,
            export_dir,
        } => {
            let session = login(&secrets, source.password.as_deref());
            let records = open_source(&secrets, &session, source.source.as_deref())?
                .fetch()
                .await?;

            let dashboard = Dashboard::build(&records, &session, &Selection { homework, group });
            print_pretty(&dashboard);

            match format {
                Format::Table => println!("{}", render_tables(&dashboard)),
                Format::Json => println!("{}", to_json(&dashboard)?),
            }

            if let Some(dir) = export_dir {
                export_dashboard(&dir, &dashboard)?;
            }
        }
        Commands::Filters { source } => {
            let session = login(&secrets, source.password.as_deref());
            let records = open_source(&secrets, &session, source.source.as_deref())?
                .fetch()
                .await?;

            let options = FilterOptions::from_records(&clean(&records, None));
            print!("{}", render_filter_options(&options));
        }
        Commands::View { source } => {
            view(&secrets, source).await?;
        }
    }

    Ok(())
}

fn login(secrets: &Secrets, password: Option<&str>) -> Session {
    let mut session = Session::anonymous();
    if let Some(password) = password {
        session.login(password, secrets);
    }
    session
}

/// Builds the record source for `explicit` or, when absent, the sheet the
/// session is allowed to read, behind the configured cache.
fn open_source(
    secrets: &Secrets,
    session: &Session,
    explicit: Option<&str>,
) -> Result<Box<dyn RecordSource>> {
    let location = match explicit {
        Some(location) => location,
        None => session
            .sheet_url(secrets)
            .context("no source given and no sheet URL configured for this session")?,
    };

    let source: Box<dyn RecordSource> = if is_remote(location) {
        Box::new(SheetClient::new(location, &SheetAuth::from_secrets(secrets))?)
    } else {
        Box::new(FileSource::new(location))
    };

    match secrets.cache_ttl() {
        Some(ttl) => Ok(Box::new(CachedSource::new(source, ttl))),
        None => Ok(source),
    }
}

const VIEW_HELP: &str = "commands: show | login <password> | logout | homework <a,b,..> | group <a,b,..> | filters | help | quit";

/// Interactive viewer. Each command re-runs the pipeline on a fresh fetch;
/// sources are kept per location so the cache survives between commands.
async fn view(secrets: &Secrets, explicit: Option<String>) -> Result<()> {
    let mut session = Session::anonymous();
    let mut selection = Selection::default();
    let mut sources: HashMap<String, Box<dyn RecordSource>> = HashMap::new();

    println!("{VIEW_HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let (command, argument) = match line.trim().split_once(' ') {
            Some((c, a)) => (c.to_string(), a.trim().to_string()),
            None => (line.trim().to_string(), String::new()),
        };

        match command.as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{VIEW_HELP}");
                continue;
            }
            "login" => {
                if session.login(&argument, secrets) {
                    println!("Login successful");
                } else {
                    println!("Incorrect password");
                }
            }
            "logout" => session = Session::anonymous(),
            "homework" => selection.homework = split_list(&argument),
            "group" => selection.group = split_list(&argument),
            "show" | "filters" => {}
            other => {
                println!("unknown command '{other}'; {VIEW_HELP}");
                continue;
            }
        }

        let location = match explicit.as_deref().or_else(|| session.sheet_url(secrets)) {
            Some(location) => location.to_string(),
            None => {
                warn!("No sheet URL configured for this session");
                continue;
            }
        };

        if !sources.contains_key(&location) {
            let source = open_source(secrets, &session, Some(location.as_str()))?;
            sources.insert(location.clone(), source);
        }
        let Some(source) = sources.get(&location) else {
            continue;
        };

        let records = match source.fetch().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, source = %source.describe(), "Fetch failed");
                continue;
            }
        };

        let dashboard = Dashboard::build(&records, &session, &selection);
        if command == "filters" {
            print!("{}", render_filter_options(&dashboard.filter_options));
        } else {
            println!("{}", render_tables(&dashboard));
        }
    }

    info!("Viewer closed");
    Ok(())
}

fn split_list(argument: &str) -> Vec<String> {
    argument
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
