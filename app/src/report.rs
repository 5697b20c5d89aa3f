use std::path::{Path, PathBuf};

use common::config::ReportConfig;
use eyre::{Context, Result};
use fio::{extract_all, load_dir};
use fio_table::Report;
use tracing::{debug, warn};

/// Where the finished report goes, both can be enabled at once
#[derive(Debug, Default, Clone)]
pub struct Output {
    pub print: bool,
    pub csv: Option<PathBuf>,
}

/// Load every log in `result_dir`, extract the KPIs and emit the report
pub fn generate(result_dir: &Path, config: &ReportConfig, output: &Output) -> Result<Report> {
    let loaded = load_dir(result_dir, &config.file_suffix())?;
    let extracted = extract_all(&loaded.documents);
    if loaded.skipped + extracted.rejected > 0 {
        warn!(
            "Skipped {} unreadable logs and {} incomplete results",
            loaded.skipped, extracted.rejected
        );
    }

    let report = Report::new(extracted.records);
    debug!("Report has {} rows", report.len());

    if output.print {
        println!("{}", report.render(config.table_style));
    }
    if let Some(path) = &output.csv {
        report
            .write_csv(path)
            .wrap_err_with(|| format!("Error while writing the report to {}", path.display()))?;
    }
    Ok(report)
}
