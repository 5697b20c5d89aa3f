pub mod config;
pub mod util;

pub const KIB_PER_MIB: f64 = 1024.0;
pub const NS_PER_MS: f64 = 1_000_000.0;

/// Placeholder for descriptive tags missing from a run's description
pub const NOT_AVAILABLE: &str = "n/a";
pub const DEFAULT_LOG_SUFFIX: &str = "fiolog";
/// Decimal places kept for floating point report values
pub const REPORT_PRECISION: i32 = 4;
