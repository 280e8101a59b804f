//! Periodic encoder: integer indices -> compass points.
//!
//! A compass point for index `s` under radius `r` and period `T` is
//! `r * e^(i * 2π * s / T)`. The index is reduced modulo `T` before the angle
//! is formed, so `s` and `s + T` give bit-identical points.

use crate::error::Result;
use crate::types::{check_period, PeriodSpec, Radius};
use num_complex::Complex64;
use std::f64::consts::TAU;

/// Angle of index `s` on a wheel of `period` slots, in `[0, 2π)`.
#[inline]
fn slot_angle(index: i64, period: i64) -> f64 {
    TAU * index.rem_euclid(period) as f64 / period as f64
}

#[inline]
fn point(radius: Complex64, index: i64, period: i64) -> Complex64 {
    radius * Complex64::from_polar(1.0, slot_angle(index, period))
}

/// One compass point.
pub fn compass(radius: impl Into<Complex64>, period: i64, index: i64) -> Result<Complex64> {
    check_period(period)?;
    Ok(point(radius.into(), index, period))
}

/// Element-wise `radius * exp(i * 2π * index / period)`.
///
/// A per-index radius must have the same length as `indices`; a scalar radius
/// is broadcast.
pub fn encode(indices: &[i64], radius: &Radius, period: i64) -> Result<Vec<Complex64>> {
    check_period(period)?;
    radius.check_len(indices.len())?;

    Ok(indices
        .iter()
        .enumerate()
        .map(|(i, &s)| point(radius.at(i), s, period))
        .collect())
}

/// Signed compass: `period_positive` for `index >= 0`, `period_negative` otherwise.
///
/// A period is only checked when some index selects it, so an all-positive
/// input never fails because of a bad negative period.
pub fn encode_signed(
    indices: &[i64],
    radius: &Radius,
    period_positive: i64,
    period_negative: i64,
) -> Result<Vec<Complex64>> {
    radius.check_len(indices.len())?;

    indices
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let period = if s >= 0 { period_positive } else { period_negative };
            check_period(period)?;
            Ok(point(radius.at(i), s, period))
        })
        .collect()
}

/// Encode with a [`PeriodSpec`], dispatching to the signed variant when it has a negative period.
pub fn encode_spec(indices: &[i64], spec: &PeriodSpec) -> Result<Vec<Complex64>> {
    match spec.negative_period() {
        Some(negative) => encode_signed(indices, spec.radius(), spec.period(), negative),
        None => encode(indices, spec.radius(), spec.period()),
    }
}
