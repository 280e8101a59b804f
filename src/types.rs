use crate::error::{AtlasError, Result};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing sample index (e.g. hours since the first sample).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeIndex(Vec<i64>);

impl TimeIndex {
    /// `0, 1, .., n - 1`
    pub fn range(n: usize) -> Self {
        Self((0..n as i64).collect())
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Radius of a compass: one complex value broadcast to every index, or one per index.
#[derive(Debug, Clone, PartialEq)]
pub enum Radius {
    Scalar(Complex64),
    PerIndex(Vec<Complex64>),
}

impl Radius {
    /// Radius applied to the `i`-th index.
    #[inline]
    pub fn at(&self, i: usize) -> Complex64 {
        match self {
            Radius::Scalar(r) => *r,
            Radius::PerIndex(rs) => rs[i],
        }
    }

    /// Fails unless a per-index radius has exactly `n` entries.
    pub fn check_len(&self, n: usize) -> Result<()> {
        match self {
            Radius::Scalar(_) => Ok(()),
            Radius::PerIndex(rs) if rs.len() == n => Ok(()),
            Radius::PerIndex(rs) => Err(AtlasError::length_mismatch("radius", n, rs.len())),
        }
    }

    /// `ln(k + 1)` for `k = 0..n`, the notebook's log-spaced spiral.
    pub fn log_spiral(n: usize) -> Self {
        Radius::PerIndex(
            (0..n)
                .map(|k| Complex64::new(((k + 1) as f64).ln(), 0.0))
                .collect(),
        )
    }
}

impl Default for Radius {
    fn default() -> Self {
        Radius::Scalar(Complex64::new(1.0, 0.0))
    }
}

impl From<f64> for Radius {
    fn from(r: f64) -> Self {
        Radius::Scalar(Complex64::new(r, 0.0))
    }
}

impl From<Complex64> for Radius {
    fn from(r: Complex64) -> Self {
        Radius::Scalar(r)
    }
}

impl From<Vec<f64>> for Radius {
    fn from(rs: Vec<f64>) -> Self {
        Radius::PerIndex(rs.into_iter().map(|r| Complex64::new(r, 0.0)).collect())
    }
}

impl From<Vec<Complex64>> for Radius {
    fn from(rs: Vec<Complex64>) -> Self {
        Radius::PerIndex(rs)
    }
}

/// Radius and period of one compass, with an optional period for negative indices.
///
/// Periods are validated on construction, so a `PeriodSpec` always holds
/// positive periods.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSpec {
    radius: Radius,
    period: i64,
    negative_period: Option<i64>,
}

impl PeriodSpec {
    pub fn new(radius: impl Into<Radius>, period: i64) -> Result<Self> {
        check_period(period)?;
        Ok(Self {
            radius: radius.into(),
            period,
            negative_period: None,
        })
    }

    /// Signed compass: `period` for `index >= 0`, `negative_period` otherwise.
    pub fn signed(radius: impl Into<Radius>, period: i64, negative_period: i64) -> Result<Self> {
        check_period(period)?;
        check_period(negative_period)?;
        Ok(Self {
            radius: radius.into(),
            period,
            negative_period: Some(negative_period),
        })
    }

    pub fn radius(&self) -> &Radius {
        &self.radius
    }

    pub fn period(&self) -> i64 {
        self.period
    }

    pub fn negative_period(&self) -> Option<i64> {
        self.negative_period
    }

    pub fn is_signed(&self) -> bool {
        self.negative_period.is_some()
    }
}

pub(crate) fn check_period(period: i64) -> Result<()> {
    if period <= 0 {
        return Err(AtlasError::InvalidPeriod { period });
    }
    Ok(())
}

/// A value attached to an atlas point, used only for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Symbol {
    Number(f64),
    Text(String),
}

impl Symbol {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Symbol::Number(v) => Some(*v),
            Symbol::Text(_) => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 Display prints 12.0 as "12" and 0.97 as "0.97"
            Symbol::Number(v) => write!(f, "{}", v),
            Symbol::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Symbol {
    fn from(v: f64) -> Self {
        Symbol::Number(v)
    }
}

impl From<i64> for Symbol {
    fn from(v: i64) -> Self {
        Symbol::Number(v as f64)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::Text(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::Text(s)
    }
}

/// Ordered symbols, parallel to an atlas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolSequence(Vec<Symbol>);

impl SymbolSequence {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    pub fn from_numbers(values: &[f64]) -> Self {
        Self(values.iter().copied().map(Symbol::Number).collect())
    }

    pub fn from_integers(values: &[i64]) -> Self {
        Self(values.iter().copied().map(Symbol::from).collect())
    }

    /// Numbers rounded to `digits` decimals, so labels stay short.
    pub fn from_f64_rounded(values: &[f64], digits: u32) -> Self {
        let scale = 10f64.powi(digits as i32);
        Self(
            values
                .iter()
                .map(|v| Symbol::Number((v * scale).round() / scale))
                .collect(),
        )
    }

    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        Self(labels.iter().map(|s| Symbol::from(s.as_ref())).collect())
    }

    /// `0, 1, .., n - 1`
    pub fn sequential(n: usize) -> Self {
        Self((0..n).map(|k| Symbol::Number(k as f64)).collect())
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn slice(&self, range: std::ops::Range<usize>) -> Self {
        Self(self.0[range].to_vec())
    }
}

impl FromIterator<Symbol> for SymbolSequence {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_spec_rejects_non_positive() {
        assert!(matches!(
            PeriodSpec::new(1.0, 0),
            Err(AtlasError::InvalidPeriod { period: 0 })
        ));
        assert!(matches!(
            PeriodSpec::signed(1.0, 12, -3),
            Err(AtlasError::InvalidPeriod { period: -3 })
        ));
        assert!(PeriodSpec::signed(1.0, 12, 7).unwrap().is_signed());
    }

    #[test]
    fn test_radius_length_check() {
        let r = Radius::from(vec![1.0, 2.0]);
        assert!(r.check_len(2).is_ok());
        assert!(matches!(
            r.check_len(3),
            Err(AtlasError::LengthMismatch { expected: 3, actual: 2, .. })
        ));
        assert!(Radius::from(5.0).check_len(100).is_ok());
    }

    #[test]
    fn test_log_spiral_radius() {
        let r = Radius::log_spiral(3);
        assert_eq!(r.at(0), Complex64::new(0.0, 0.0));
        assert!((r.at(2).re - 3f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::Number(12.0).to_string(), "12");
        assert_eq!(Symbol::Number(0.97).to_string(), "0.97");
        assert_eq!(Symbol::from("Jan").to_string(), "Jan");
    }

    #[test]
    fn test_rounded_symbols() {
        let s = SymbolSequence::from_f64_rounded(&[0.12345, -0.9999], 2);
        assert_eq!(s.as_slice()[0], Symbol::Number(0.12));
        assert_eq!(s.as_slice()[1], Symbol::Number(-1.0));
    }
}
