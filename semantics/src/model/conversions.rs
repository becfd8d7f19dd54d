//! Built-in conversion tables for the numeric scalar kinds and enums.
//!
//! The implicit-widening table below is the source of truth; the explicit
//! (narrowing) set offered by conversion completion is its complement over
//! all ordered pairs, so completeness is independent of declaration order.

use super::NumericKind;

/// Implicit widening targets per numeric kind.
const IMPLICIT_WIDENING: &[(NumericKind, &[NumericKind])] = {
    use NumericKind::*;
    &[
        (SByte, &[Short, Int, Long, Float, Double, Decimal]),
        (
            Byte,
            &[Short, UShort, Int, UInt, Long, ULong, Float, Double, Decimal],
        ),
        (Short, &[Int, Long, Float, Double, Decimal]),
        (UShort, &[Int, UInt, Long, ULong, Float, Double, Decimal]),
        (Int, &[Long, Float, Double, Decimal]),
        (UInt, &[Long, ULong, Float, Double, Decimal]),
        (Long, &[Float, Double, Decimal]),
        (ULong, &[Float, Double, Decimal]),
        (Char, &[UShort, Int, UInt, Long, ULong, Float, Double, Decimal]),
        (Float, &[Double]),
        (Double, &[]),
        (Decimal, &[]),
    ]
};

/// Implicit widening targets of `kind`.
pub fn implicit_numeric_targets(kind: NumericKind) -> &'static [NumericKind] {
    IMPLICIT_WIDENING
        .iter()
        .find(|(from, _)| *from == kind)
        .map(|(_, targets)| *targets)
        .unwrap_or(&[])
}

/// Explicit (narrowing) conversion targets of `kind`: every other numeric
/// kind that is not already reachable implicitly.
pub fn explicit_numeric_targets(kind: NumericKind) -> Vec<NumericKind> {
    let implicit = implicit_numeric_targets(kind);
    NumericKind::ALL
        .into_iter()
        .filter(|target| *target != kind && !implicit.contains(target))
        .collect()
}

/// Conversion targets offered on an enum receiver: the underlying integral
/// kind first, then every other numeric kind.
pub fn enum_conversion_targets(underlying: NumericKind) -> Vec<NumericKind> {
    let mut targets = vec![underlying];
    targets.extend(NumericKind::ALL.into_iter().filter(|k| *k != underlying));
    targets
}
