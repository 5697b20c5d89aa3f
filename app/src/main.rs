use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use common::config::{ReportConfig, TableStyle};
use eyre::{ContextCompat, Result};
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod report;

/// Crates whose log level follows `RUST_LOG` unless overridden with `--log`
const MODULES: &[&str] = &["fio_kpi", "fio", "fio_table", "common"];

/// Summarize fio logs into a KPI table and CSV report
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Directory containing the fio logs
    result_dir: PathBuf,
    /// Where to write the CSV report
    #[arg(required_unless_present = "print")]
    output_csv: Option<PathBuf>,
    /// Print the report table to stdout
    #[arg(short, long, default_value_t = false)]
    print: bool,
    /// Table style used with --print
    #[arg(short, long, value_enum)]
    style: Option<TableStyle>,
    /// Extension of the fio log files
    #[arg(long)]
    suffix: Option<String>,
    /// YAML file with report settings, flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Extra log directives, ie. `fio=debug`
    #[arg(short, long)]
    log: Vec<String>,
    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Cli::parse();
    let _guard = match init_logging(&args) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error while setting up logging: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<()> {
    let config = report_config(&args)?;
    let output = report::Output {
        print: args.print,
        csv: args.output_csv,
    };
    report::generate(&args.result_dir, &config, &output)?;
    Ok(())
}

fn report_config(args: &Cli) -> Result<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    if let Some(suffix) = &args.suffix {
        config.suffix = suffix.clone();
    }
    if let Some(style) = args.style {
        config.table_style = style;
    }
    Ok(config)
}

fn init_logging(args: &Cli) -> Result<Option<WorkerGuard>> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let mut env_filter = EnvFilter::new("");

    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }

    for module in MODULES {
        if !args
            .log
            .iter()
            .any(|x| x.split('=').next() == Some(*module))
        {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    let (file_layer, guard) = match &args.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|x| !x.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path.file_name().context("Log file path has no file name")?;
            let (non_blocking, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (
                Some(layer().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_writer(std::io::stderr)
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
