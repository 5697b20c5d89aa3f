use std::{
    fs::{Permissions, metadata},
    io::Write,
    iter::once,
    os::unix::fs::PermissionsExt,
    path::Path,
};

use common::{
    REPORT_PRECISION,
    config::TableStyle,
    util::{round_to, shortest_float},
};
use comfy_table::{
    CellAlignment, Table,
    presets::{ASCII_MARKDOWN, NOTHING, UTF8_FULL},
};
use eyre::{Context, Result};
use fio::{KpiRecord, Utilization};
use itertools::Itertools;
use tempfile::Builder;
use tracing::debug;

pub const HEADERS: [&str; 12] = [
    "Backend",
    "Driver",
    "Format",
    "RW",
    "BS",
    "IODepth",
    "Numjobs",
    "Round",
    "BW(MiB/s)",
    "IOPS",
    "LAT(ms)",
    "Util(%)",
];

/// KPI records in report order
#[derive(Debug, Clone, Default)]
pub struct Report {
    records: Vec<KpiRecord>,
}

impl Report {
    pub fn new(records: Vec<KpiRecord>) -> Self {
        let records = records
            .into_iter()
            .sorted_by(|a, b| a.sort_key().cmp(&b.sort_key()))
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[KpiRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn render(&self, style: TableStyle) -> String {
        let mut table = Table::new();
        table.load_preset(match style {
            TableStyle::Default => UTF8_FULL,
            TableStyle::MswordFriendly => ASCII_MARKDOWN,
            TableStyle::PlainColumns | TableStyle::Plain => NOTHING,
        });
        table.set_header(HEADERS.to_vec());
        for record in &self.records {
            table.add_row(cells(record, |x| format!("{x:.4}")));
        }

        if style == TableStyle::Plain {
            for column in table.column_iter_mut() {
                column
                    .set_padding((0, 2))
                    .set_cell_alignment(CellAlignment::Left);
            }
        }
        table.to_string()
    }

    /// Write the report as CSV with a leading row index column
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(once("").chain(HEADERS))?;
        for (idx, record) in self.records.iter().enumerate() {
            writer.write_record(
                once(idx.to_string())
                    .chain(cells(record, |x| shortest_float(round_to(x, REPORT_PRECISION)))),
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the CSV report to `path`. The data goes to a fresh temporary
    /// file next to it that replaces `path` only once fully written. A
    /// replaced report keeps its permissions, a new one gets the usual
    /// `0666 & !umask`.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = Builder::new()
            .permissions(Permissions::from_mode(0o666))
            .tempfile_in(dir)
            .wrap_err_with(|| format!("Creating temporary file in {}", dir.display()))?;
        if let Ok(existing) = metadata(path) {
            file.as_file()
                .set_permissions(existing.permissions())
                .wrap_err_with(|| format!("Copying permissions of {}", path.display()))?;
        }
        self.write_csv_to(file.as_file_mut())
            .wrap_err_with(|| format!("Writing {}", file.path().display()))?;
        file.persist(path)
            .wrap_err_with(|| format!("Saving report to {}", path.display()))?;
        debug!("Wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }
}

fn cells(record: &KpiRecord, float: impl Fn(f64) -> String) -> Vec<String> {
    vec![
        record.backend.clone(),
        record.driver.clone(),
        record.format.clone(),
        record.rw.clone(),
        record.bs.clone(),
        record.iodepth.clone(),
        record.numjobs.clone(),
        record.round.clone(),
        float(record.bw),
        record.iops.to_string(),
        float(record.lat),
        match record.util {
            Utilization::Percent(util) => float(util),
            Utilization::Error => Utilization::Error.to_string(),
        },
    ]
}
