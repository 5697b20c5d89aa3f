use std::path::Path;

use clap::ValueEnum;
use eyre::Result;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_LOG_SUFFIX, util::read_yaml_file};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Extension of the fio log files, without the leading dot
    pub suffix: String,
    pub table_style: TableStyle,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TableStyle {
    /// Box drawing borders
    #[default]
    Default,
    /// Pipe separated columns, pastes cleanly into word processors
    MswordFriendly,
    /// Whitespace separated columns
    PlainColumns,
    /// Whitespace separated, left aligned, no left padding
    Plain,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_LOG_SUFFIX.to_owned(),
            table_style: TableStyle::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        read_yaml_file(path)
    }

    /// The suffix as it appears at the end of a file name, ie. `.fiolog`
    pub fn file_suffix(&self) -> String {
        format!(".{}", self.suffix.trim_start_matches('.'))
    }
}
