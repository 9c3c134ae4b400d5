//! GPU record schema and the bundled dataset.
//!
//! The dataset is a flat JSON array of fixed-shape records compiled into the
//! binary. Records are immutable once loaded.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bundled dataset, baked in at build time.
const EMBEDDED_DATA: &str = include_str!("../data/gpu_data.json");

/// One GPU SKU.
///
/// `None` means "not applicable to this architecture", never "unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuRecord {
    pub name: String,
    pub citation: String,
    /// Thermal design power in watts.
    pub tdp: u64,
    /// Streaming multiprocessors.
    pub sms: u64,
    pub cores_cuda: u64,
    pub cores_tensor: u64,
    /// Register file size in bytes.
    pub register_size: Option<u64>,
    pub cache_l1: Option<u64>,
    pub cache_l2: Option<u64>,
    /// VRAM in bytes.
    pub vram: u64,
    /// Memory bandwidth in bytes per second.
    pub membw: f64,

    // Throughput, operations per second.
    pub fp32_general: f64,
    pub fp16: f64,
    pub fp16_ignore_crippled: f64,
    pub bf16: Option<f64>,
    pub bf16_ignore_crippled: Option<f64>,
    pub tf32: Option<f64>,
    pub int8: Option<f64>,
    pub int4: Option<f64>,
    pub fp8: Option<f64>,
    pub fp8_ignore_crippled: Option<f64>,
    pub fp6: Option<f64>,
    pub fp4: Option<f64>,

    /// Low-precision accumulation into FP32 runs at reduced rate.
    pub crippled_fp32acc: bool,
}

/// Errors raised while loading a dataset.
#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Empty,
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "cannot read dataset: {}", e),
            DatasetError::Parse(e) => write!(f, "malformed dataset: {}", e),
            DatasetError::Empty => write!(f, "dataset contains no records"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(e) => Some(e),
            DatasetError::Parse(e) => Some(e),
            DatasetError::Empty => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(e: std::io::Error) -> Self {
        DatasetError::Io(e)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(e: serde_json::Error) -> Self {
        DatasetError::Parse(e)
    }
}

/// Read-only collection of GPU records, loaded wholesale.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<GpuRecord>,
}

impl Dataset {
    /// Parses the dataset compiled into the binary.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json_str(EMBEDDED_DATA)
    }

    /// Loads a dataset from a JSON file with the same schema as the bundled one.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = text.len(), "read dataset file");
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, DatasetError> {
        let records: Vec<GpuRecord> = serde_json::from_str(text)?;
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        debug!(records = records.len(), "parsed dataset");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[GpuRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::GpuRecord;

    /// Minimal record; callers override the fields they care about.
    pub fn record(name: &str) -> GpuRecord {
        GpuRecord {
            name: name.to_string(),
            citation: format!("https://example.com/{}", name),
            tdp: 300,
            sms: 80,
            cores_cuda: 5120,
            cores_tensor: 640,
            register_size: Some(20_971_520),
            cache_l1: Some(10_485_760),
            cache_l2: Some(6_291_456),
            vram: 16_000_000_000,
            membw: 900e9,
            fp32_general: 15.7e12,
            fp16: 120e12,
            fp16_ignore_crippled: 120e12,
            bf16: None,
            bf16_ignore_crippled: None,
            tf32: None,
            int8: Some(240e12),
            int4: Some(480e12),
            fp8: None,
            fp8_ignore_crippled: None,
            fp6: None,
            fp4: None,
            crippled_fp32acc: false,
        }
    }

    /// A consumer card whose FP32-accumulate rate is halved.
    pub fn crippled(name: &str, full_fp16: f64) -> GpuRecord {
        GpuRecord {
            fp16: full_fp16 / 2.0,
            fp16_ignore_crippled: full_fp16,
            bf16: Some(full_fp16 / 2.0),
            bf16_ignore_crippled: Some(full_fp16),
            fp8: Some(full_fp16),
            fp8_ignore_crippled: Some(full_fp16 * 2.0),
            crippled_fp32acc: true,
            ..record(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_parses() {
        let ds = Dataset::embedded().expect("bundled dataset must parse");
        assert_eq!(ds.len(), 30);
        assert!(ds.records().iter().any(|r| r.name == "H100-SXM"));
    }

    #[test]
    fn embedded_dataset_keeps_nulls_distinct_from_zero() {
        let ds = Dataset::embedded().unwrap();
        let t4 = ds.records().iter().find(|r| r.name == "T4").unwrap();
        assert_eq!(t4.cache_l1, None);
        assert_eq!(t4.cache_l2, None);
        assert_eq!(t4.bf16, None);
    }

    #[test]
    fn non_crippled_records_have_equal_dual_readings() {
        let ds = Dataset::embedded().unwrap();
        for r in ds.records().iter().filter(|r| !r.crippled_fp32acc) {
            assert_eq!(r.fp16, r.fp16_ignore_crippled, "{}", r.name);
            assert_eq!(r.bf16, r.bf16_ignore_crippled, "{}", r.name);
            assert_eq!(r.fp8, r.fp8_ignore_crippled, "{}", r.name);
        }
    }

    #[test]
    fn empty_array_is_rejected() {
        assert!(matches!(
            Dataset::from_json_str("[]"),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Dataset::from_json_str("{not json"),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpus.json");
        let json = serde_json::to_string(&vec![fixtures::record("X1")]).unwrap();
        std::fs::write(&path, json).unwrap();

        let ds = Dataset::from_path(&path).unwrap();
        assert_eq!(ds.records()[0].name, "X1");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
