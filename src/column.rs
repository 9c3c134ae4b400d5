//! Column identities and descriptors.
//!
//! A [`ColumnDescriptor`] is everything a generic grid needs to show one
//! column: a stable id, a header label, a cell accessor, and for dual-reading
//! columns a custom comparator. The accessor and comparator both take the
//! current `factor_in_cripple` flag, so a column id never changes identity
//! when the toggle flips.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::fmt::{FmtStyle, Unit, format_count, format_crippled, format_magnitude, format_watts};
use crate::model::GpuRecord;
use crate::resolve::{DualField, compare_dual, compare_optional, resolve};

/// Every column the table knows about, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnId {
    Name,
    Tdp,
    Sms,
    Vram,
    Membw,
    CoresCuda,
    CoresTensor,
    RegisterSize,
    CacheL1,
    CacheL2,
    Fp32General,
    Fp16,
    Bf16,
    Tf32,
    Int8,
    Int4,
    Fp8,
    Fp6,
    Fp4,
    CrippledFp32Acc,
    Citation,
}

impl ColumnId {
    pub const COUNT: usize = 21;

    pub const ALL: [ColumnId; Self::COUNT] = [
        ColumnId::Name,
        ColumnId::Tdp,
        ColumnId::Sms,
        ColumnId::Vram,
        ColumnId::Membw,
        ColumnId::CoresCuda,
        ColumnId::CoresTensor,
        ColumnId::RegisterSize,
        ColumnId::CacheL1,
        ColumnId::CacheL2,
        ColumnId::Fp32General,
        ColumnId::Fp16,
        ColumnId::Bf16,
        ColumnId::Tf32,
        ColumnId::Int8,
        ColumnId::Int4,
        ColumnId::Fp8,
        ColumnId::Fp6,
        ColumnId::Fp4,
        ColumnId::CrippledFp32Acc,
        ColumnId::Citation,
    ];

    /// Position in [`ColumnId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Dataset key, also the stable identifier used by visibility operations.
    pub fn key(self) -> &'static str {
        match self {
            ColumnId::Name => "name",
            ColumnId::Tdp => "tdp",
            ColumnId::Sms => "sms",
            ColumnId::Vram => "vram",
            ColumnId::Membw => "membw",
            ColumnId::CoresCuda => "cores_cuda",
            ColumnId::CoresTensor => "cores_tensor",
            ColumnId::RegisterSize => "register_size",
            ColumnId::CacheL1 => "cache_l1",
            ColumnId::CacheL2 => "cache_l2",
            ColumnId::Fp32General => "fp32_general",
            ColumnId::Fp16 => "fp16",
            ColumnId::Bf16 => "bf16",
            ColumnId::Tf32 => "tf32",
            ColumnId::Int8 => "int8",
            ColumnId::Int4 => "int4",
            ColumnId::Fp8 => "fp8",
            ColumnId::Fp6 => "fp6",
            ColumnId::Fp4 => "fp4",
            ColumnId::CrippledFp32Acc => "crippled_fp32acc",
            ColumnId::Citation => "citation",
        }
    }

    /// Human-readable header and hidden-column chip label.
    pub fn display_name(self) -> &'static str {
        match self {
            ColumnId::Name => "Name",
            ColumnId::Tdp => "TDP (W)",
            ColumnId::Sms => "SMs",
            ColumnId::Vram => "VRAM",
            ColumnId::Membw => "Memory Bandwidth",
            ColumnId::CoresCuda => "CUDA Cores",
            ColumnId::CoresTensor => "Tensor Cores",
            ColumnId::RegisterSize => "Register Size",
            ColumnId::CacheL1 => "L1 Cache",
            ColumnId::CacheL2 => "L2 Cache",
            ColumnId::Fp32General => "FP32 Performance",
            ColumnId::Fp16 => "FP16 Performance",
            ColumnId::Bf16 => "BF16 Performance",
            ColumnId::Tf32 => "TF32 Performance",
            ColumnId::Int8 => "INT8 Performance",
            ColumnId::Int4 => "INT4 Performance",
            ColumnId::Fp8 => "FP8 Performance",
            ColumnId::Fp6 => "FP6 Performance",
            ColumnId::Fp4 => "FP4 Performance",
            ColumnId::CrippledFp32Acc => "Crippled FP32 Accuracy",
            ColumnId::Citation => "Citation",
        }
    }

    /// Whether the column is shown on first load.
    pub fn visible_by_default(self) -> bool {
        matches!(
            self,
            ColumnId::Name
                | ColumnId::Citation
                | ColumnId::Tdp
                | ColumnId::Membw
                | ColumnId::Vram
                | ColumnId::Fp32General
                | ColumnId::Fp16
                | ColumnId::CrippledFp32Acc
        )
    }

    /// The dual-reading field behind this column, if any.
    pub fn dual_field(self) -> Option<DualField> {
        match self {
            ColumnId::Fp16 => Some(DualField::Fp16),
            ColumnId::Bf16 => Some(DualField::Bf16),
            ColumnId::Fp8 => Some(DualField::Fp8),
            _ => None,
        }
    }

    /// Raw cell value of this column for `record`.
    pub fn value(self, record: &GpuRecord, factor_in_cripple: bool) -> CellValue {
        let dual = |field| {
            CellValue::Magnitude(resolve(record, field, factor_in_cripple), Unit::TeraOps)
        };
        match self {
            ColumnId::Name => CellValue::Text(record.name.clone()),
            ColumnId::Tdp => CellValue::Watts(record.tdp),
            ColumnId::Sms => CellValue::Count(Some(record.sms)),
            ColumnId::Vram => CellValue::Magnitude(Some(record.vram as f64), Unit::Gigabytes),
            ColumnId::Membw => CellValue::Magnitude(Some(record.membw), Unit::Gigabytes),
            ColumnId::CoresCuda => CellValue::Count(Some(record.cores_cuda)),
            ColumnId::CoresTensor => CellValue::Count(Some(record.cores_tensor)),
            ColumnId::RegisterSize => bytes_kb(record.register_size),
            ColumnId::CacheL1 => bytes_kb(record.cache_l1),
            ColumnId::CacheL2 => bytes_kb(record.cache_l2),
            ColumnId::Fp32General => CellValue::Magnitude(Some(record.fp32_general), Unit::TeraOps),
            ColumnId::Fp16 => dual(DualField::Fp16),
            ColumnId::Bf16 => dual(DualField::Bf16),
            ColumnId::Fp8 => dual(DualField::Fp8),
            ColumnId::Tf32 => CellValue::Magnitude(record.tf32, Unit::TeraOps),
            ColumnId::Int8 => CellValue::Magnitude(record.int8, Unit::TeraOps),
            ColumnId::Int4 => CellValue::Magnitude(record.int4, Unit::TeraOps),
            ColumnId::Fp6 => CellValue::Magnitude(record.fp6, Unit::TeraOps),
            ColumnId::Fp4 => CellValue::Magnitude(record.fp4, Unit::TeraOps),
            ColumnId::CrippledFp32Acc => CellValue::Flag(record.crippled_fp32acc),
            ColumnId::Citation => CellValue::Link(record.citation.clone()),
        }
    }
}

fn bytes_kb(v: Option<u64>) -> CellValue {
    CellValue::Magnitude(v.map(|b| b as f64), Unit::Kilobytes)
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raised when a string does not name a known column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumn(pub String);

impl fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column '{}'", self.0)
    }
}

impl std::error::Error for UnknownColumn {}

impl FromStr for ColumnId {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnId::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

/// Typed cell content before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Watts(u64),
    Count(Option<u64>),
    Magnitude(Option<f64>, Unit),
    Flag(bool),
    Link(String),
}

impl CellValue {
    /// Table cell text.
    pub fn display(&self) -> String {
        self.render(FmtStyle::Compact)
    }

    /// Precise text for the detail popup.
    pub fn precise(&self) -> String {
        self.render(FmtStyle::Precise)
    }

    fn render(&self, style: FmtStyle) -> String {
        match self {
            CellValue::Text(s) | CellValue::Link(s) => s.clone(),
            CellValue::Watts(w) => format_watts(*w),
            CellValue::Count(c) => format_count(*c),
            CellValue::Magnitude(v, unit) => format_magnitude(*v, *unit, style),
            CellValue::Flag(b) => format_crippled(*b).to_string(),
        }
    }

    /// True when the cell renders as the not-applicable marker.
    pub fn is_not_applicable(&self) -> bool {
        match self {
            CellValue::Count(c) => c.is_none_or(|c| c == 0),
            CellValue::Magnitude(v, _) => v.is_none_or(|v| v == 0.0),
            _ => false,
        }
    }

    pub fn sort_key(&self) -> SortKey {
        match self {
            CellValue::Text(s) | CellValue::Link(s) => SortKey::String(s.clone()),
            CellValue::Watts(w) => SortKey::Integer(*w as i64),
            CellValue::Count(c) => c.map_or(SortKey::Missing, |c| SortKey::Integer(c as i64)),
            CellValue::Magnitude(v, _) => v.map_or(SortKey::Missing, SortKey::Float),
            CellValue::Flag(b) => SortKey::Integer(i64::from(*b)),
        }
    }
}

/// Sort key types for table columns.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Not applicable; orders before every present value.
    Missing,
    Integer(i64),
    Float(f64),
    String(String),
}

impl SortKey {
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Less,
            (_, SortKey::Missing) => Ordering::Greater,
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => compare_optional(Some(*a), Some(*b)),
            (SortKey::String(a), SortKey::String(b)) => compare_natural(a, b),
            _ => Ordering::Equal,
        }
    }
}

/// Splits `s` into alternating runs of ASCII digits and everything else.
fn runs(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_digit = None;
    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        if prev_digit.is_some_and(|p| p != digit) {
            out.push(&s[start..i]);
            start = i;
        }
        prev_digit = Some(digit);
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}

fn is_digits(run: &str) -> bool {
    run.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric comparison of two digit runs of any length.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Case-insensitive natural order: `A10 < A10g < A100-SXM`.
///
/// Digit runs compare by value, text runs lexically, and a text run orders
/// before a digit run. When one name is a prefix of the other in runs, the
/// shorter one comes first.
pub fn compare_natural(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    let (ra, rb) = (runs(&a), runs(&b));
    for (x, y) in ra.iter().zip(&rb) {
        let ord = match (is_digits(x), is_digits(y)) {
            (true, true) => compare_digits(x, y),
            (false, false) => x.cmp(y),
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ra.len().cmp(&rb.len())
}

/// Custom three-way comparator: `(a, b, factor_in_cripple)`.
pub type Comparator = fn(&GpuRecord, &GpuRecord, bool) -> Ordering;

fn compare_fp16(a: &GpuRecord, b: &GpuRecord, factor_in_cripple: bool) -> Ordering {
    compare_dual(a, b, DualField::Fp16, factor_in_cripple)
}

fn compare_bf16(a: &GpuRecord, b: &GpuRecord, factor_in_cripple: bool) -> Ordering {
    compare_dual(a, b, DualField::Bf16, factor_in_cripple)
}

fn compare_fp8(a: &GpuRecord, b: &GpuRecord, factor_in_cripple: bool) -> Ordering {
    compare_dual(a, b, DualField::Fp8, factor_in_cripple)
}

/// What a grid needs to render and sort one column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDescriptor {
    pub id: ColumnId,
    pub header: &'static str,
    /// Only set for dual-reading columns.
    pub comparator: Option<Comparator>,
}

impl ColumnDescriptor {
    pub fn new(id: ColumnId) -> Self {
        let comparator = match id.dual_field() {
            Some(DualField::Fp16) => Some(compare_fp16 as Comparator),
            Some(DualField::Bf16) => Some(compare_bf16 as Comparator),
            Some(DualField::Fp8) => Some(compare_fp8 as Comparator),
            None => None,
        };
        Self {
            id,
            header: id.display_name(),
            comparator,
        }
    }

    pub fn value(&self, record: &GpuRecord, factor_in_cripple: bool) -> CellValue {
        self.id.value(record, factor_in_cripple)
    }

    /// Ascending comparison; the grid applies direction afterwards.
    pub fn compare(&self, a: &GpuRecord, b: &GpuRecord, factor_in_cripple: bool) -> Ordering {
        match self.comparator {
            Some(cmp) => cmp(a, b, factor_in_cripple),
            None => self
                .value(a, factor_in_cripple)
                .sort_key()
                .compare(&self.value(b, factor_in_cripple).sort_key()),
        }
    }
}

/// Descriptors for every column, in display order.
pub fn columns() -> Vec<ColumnDescriptor> {
    ColumnId::ALL.iter().copied().map(ColumnDescriptor::new).collect()
}
