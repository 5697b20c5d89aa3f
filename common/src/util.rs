use std::{fs::read_to_string, path::Path};

use eyre::{Context, Result};
use serde::de::DeserializeOwned;

pub fn read_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        read_to_string(path).wrap_err_with(|| format!("Reading {}", path.display()))?;
    serde_yml::from_str(&content).wrap_err_with(|| format!("Parsing {}", path.display()))
}

/// Round half away from zero to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Shortest representation that still reads back as the same float, always
/// with a decimal point (`100.0`, `0.5`)
pub fn shortest_float(value: f64) -> String {
    format!("{value:?}")
}
