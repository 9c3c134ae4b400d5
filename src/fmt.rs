//! Unit formatting for GPU spec cells.
//!
//! All pure formatting functions (no ratatui styles, no UI layout) live here.
//! Every magnitude has two renderings: a compact one for table cells and a
//! precise one for the detail popup, selected via [`FmtStyle`].

/// Marker for metrics that do not exist on a part. Never rendered as "0".
pub const NOT_APPLICABLE: &str = "N/A";

/// Controls compact (table cells) vs precise (detail popup) output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmtStyle {
    /// Compact: `"2 KB"`, `"8.0 GB"`, `"35.58 TFLOPS"`
    Compact,
    /// Precise: `"2.048 KB"`, `"8.000 GB"`, `"35.5800000000 TFLOPS"`
    Precise,
}

/// Magnitude class of a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Bytes shown in thousands.
    Kilobytes,
    /// Bytes (or bytes/s) shown in billions.
    Gigabytes,
    /// Operations per second shown in trillions.
    TeraOps,
}

impl Unit {
    fn divisor(self) -> f64 {
        match self {
            Unit::Kilobytes => 1e3,
            Unit::Gigabytes => 1e9,
            Unit::TeraOps => 1e12,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Kilobytes => "KB",
            Unit::Gigabytes => "GB",
            Unit::TeraOps => "TFLOPS",
        }
    }

    fn decimals(self, style: FmtStyle) -> usize {
        match (self, style) {
            (Unit::Kilobytes, FmtStyle::Compact) => 0,
            (Unit::Kilobytes, FmtStyle::Precise) => 3,
            (Unit::Gigabytes, FmtStyle::Compact) => 1,
            (Unit::Gigabytes, FmtStyle::Precise) => 3,
            (Unit::TeraOps, FmtStyle::Compact) => 2,
            (Unit::TeraOps, FmtStyle::Precise) => 10,
        }
    }
}

/// Returns true for values that must render as [`NOT_APPLICABLE`].
fn is_absent(value: Option<f64>) -> bool {
    match value {
        None => true,
        Some(v) => v == 0.0 || !v.is_finite(),
    }
}

/// Format a raw magnitude in the given unit.
///
/// `None`, zero, and non-finite values yield [`NOT_APPLICABLE`].
pub fn format_magnitude(value: Option<f64>, unit: Unit, style: FmtStyle) -> String {
    if is_absent(value) {
        return NOT_APPLICABLE.to_string();
    }
    let scaled = value.unwrap_or_default() / unit.divisor();
    let decimals = unit.decimals(style);
    if decimals == 0 {
        // Half rounds up, matching integer display of the compact KB column.
        format!("{:.0} {}", scaled.round(), unit.suffix())
    } else {
        format!("{:.prec$} {}", scaled, unit.suffix(), prec = decimals)
    }
}

/// Format thermal design power: `"300 W"`.
pub fn format_watts(watts: u64) -> String {
    if watts == 0 {
        return NOT_APPLICABLE.to_string();
    }
    format!("{} W", watts)
}

/// Format a plain count (SMs, cores).
pub fn format_count(count: Option<u64>) -> String {
    match count {
        Some(c) if c > 0 => c.to_string(),
        _ => NOT_APPLICABLE.to_string(),
    }
}

/// Badge text for the crippled FP32-accumulate flag.
pub fn format_crippled(crippled: bool) -> &'static str {
    if crippled { "Crippled" } else { "Good" }
}

/// Truncate string to max length with unicode ellipsis (`…`).
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
