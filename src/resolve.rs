//! Dual-reading throughput resolution.
//!
//! FP16, BF16 and FP8 carry two readings per record: the nominal value, which
//! factors in a crippled FP32-accumulate rate, and an `_ignore_crippled`
//! alternate. A single global flag picks which one is authoritative.

use std::cmp::Ordering;

use crate::model::GpuRecord;

/// Columns backed by two parallel dataset fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DualField {
    Fp16,
    Bf16,
    Fp8,
}

impl DualField {
    pub const ALL: [DualField; 3] = [DualField::Fp16, DualField::Bf16, DualField::Fp8];

    /// Nominal (crippled-aware) reading.
    pub fn nominal(self, record: &GpuRecord) -> Option<f64> {
        match self {
            DualField::Fp16 => Some(record.fp16),
            DualField::Bf16 => record.bf16,
            DualField::Fp8 => record.fp8,
        }
    }

    /// Reading that ignores the crippled accumulate rate.
    pub fn ignore_crippled(self, record: &GpuRecord) -> Option<f64> {
        match self {
            DualField::Fp16 => Some(record.fp16_ignore_crippled),
            DualField::Bf16 => record.bf16_ignore_crippled,
            DualField::Fp8 => record.fp8_ignore_crippled,
        }
    }
}

/// Effective value of `field` under the current toggle.
///
/// `factor_in_cripple == true` reads the nominal field, otherwise the
/// `_ignore_crippled` alternate.
pub fn resolve(record: &GpuRecord, field: DualField, factor_in_cripple: bool) -> Option<f64> {
    if factor_in_cripple {
        field.nominal(record)
    } else {
        field.ignore_crippled(record)
    }
}

/// Three-way comparison of two records on a dual-reading column.
///
/// Evaluated fresh on every call. A missing value orders before any present
/// value; direction is applied by the caller.
pub fn compare_dual(
    a: &GpuRecord,
    b: &GpuRecord,
    field: DualField,
    factor_in_cripple: bool,
) -> Ordering {
    compare_optional(
        resolve(a, field, factor_in_cripple),
        resolve(b, field, factor_in_cripple),
    )
}

/// `None` < `Some`, then IEEE total order.
pub fn compare_optional(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{crippled, record};
    use proptest::prelude::*;

    #[test]
    fn resolve_picks_field_by_toggle() {
        let r = crippled("3090", 142e12);
        assert_eq!(resolve(&r, DualField::Fp16, true), Some(71e12));
        assert_eq!(resolve(&r, DualField::Fp16, false), Some(142e12));
        assert_eq!(resolve(&r, DualField::Bf16, true), Some(71e12));
        assert_eq!(resolve(&r, DualField::Bf16, false), Some(142e12));
        assert_eq!(resolve(&r, DualField::Fp8, true), Some(142e12));
        assert_eq!(resolve(&r, DualField::Fp8, false), Some(284e12));
    }

    #[test]
    fn toggle_flips_order_between_crippled_and_clean_cards() {
        // 4090 is crippled; L40 is not.
        let gaming = crippled("4090", 330e12);
        let mut pro = record("L40");
        pro.fp16 = 181e12;
        pro.fp16_ignore_crippled = 181e12;

        assert_eq!(
            compare_dual(&gaming, &pro, DualField::Fp16, true),
            Ordering::Less
        );
        assert_eq!(
            compare_dual(&gaming, &pro, DualField::Fp16, false),
            Ordering::Greater
        );
    }

    #[test]
    fn missing_sorts_first_in_both_modes() {
        let without = record("T4"); // no bf16, no fp8
        let with = crippled("4090", 330e12);
        for mode in [true, false] {
            for field in [DualField::Bf16, DualField::Fp8] {
                assert_eq!(compare_dual(&without, &with, field, mode), Ordering::Less);
                assert_eq!(compare_dual(&with, &without, field, mode), Ordering::Greater);
                assert_eq!(compare_dual(&without, &without, field, mode), Ordering::Equal);
            }
        }
    }

    fn arb_reading() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![Just(None), (1.0e9..2.0e15f64).prop_map(Some)]
    }

    fn arb_record() -> impl Strategy<Value = GpuRecord> {
        (
            1.0e12..2.0e15f64,
            1.0e12..2.0e15f64,
            arb_reading(),
            arb_reading(),
            arb_reading(),
            arb_reading(),
            any::<bool>(),
        )
            .prop_map(|(fp16, fp16_ic, bf16, bf16_ic, fp8, fp8_ic, flag)| GpuRecord {
                fp16,
                fp16_ignore_crippled: fp16_ic,
                bf16,
                bf16_ignore_crippled: bf16_ic,
                fp8,
                fp8_ignore_crippled: fp8_ic,
                crippled_fp32acc: flag,
                ..record("prop")
            })
    }

    fn arb_field() -> impl Strategy<Value = DualField> {
        prop_oneof![
            Just(DualField::Fp16),
            Just(DualField::Bf16),
            Just(DualField::Fp8)
        ]
    }

    proptest! {
        #[test]
        fn resolve_matches_definition(r in arb_record(), field in arb_field(), t in any::<bool>()) {
            let expected = if t { field.nominal(&r) } else { field.ignore_crippled(&r) };
            prop_assert_eq!(resolve(&r, field, t), expected);
        }

        #[test]
        fn comparator_is_antisymmetric(
            a in arb_record(),
            b in arb_record(),
            field in arb_field(),
            t in any::<bool>(),
        ) {
            prop_assert_eq!(
                compare_dual(&a, &b, field, t),
                compare_dual(&b, &a, field, t).reverse()
            );
        }

        #[test]
        fn comparator_agrees_with_resolved_values(
            a in arb_record(),
            b in arb_record(),
            field in arb_field(),
            t in any::<bool>(),
        ) {
            let (va, vb) = (resolve(&a, field, t), resolve(&b, field, t));
            let ord = compare_dual(&a, &b, field, t);
            match (va, vb) {
                (Some(x), Some(y)) => prop_assert_eq!(ord, x.partial_cmp(&y).unwrap()),
                (None, Some(_)) => prop_assert_eq!(ord, Ordering::Less),
                (Some(_), None) => prop_assert_eq!(ord, Ordering::Greater),
                (None, None) => prop_assert_eq!(ord, Ordering::Equal),
            }
        }
    }
}
