//! Atlas composition: per-field compass points summed element-wise.
//!
//! Summation runs in the order fields were added. Reordering fields gives the
//! same atlas up to floating-point rounding (f64 addition is not associative),
//! which is within [`COMPOSE_RELATIVE_TOLERANCE`] for any realistic field count.
//! No normalization is applied: magnitudes grow with the number and radii of
//! the summed fields.

use crate::encoder::encode_spec;
use crate::error::{AtlasError, Result};
use crate::types::PeriodSpec;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// Relative tolerance for comparing atlases composed in different field orders.
pub const COMPOSE_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Ordered sequence of complex coordinates, one per time sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Atlas(Vec<Complex64>);

impl Atlas {
    pub fn new(points: Vec<Complex64>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Complex64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Complex64> {
        self.0.iter()
    }

    /// A new atlas holding the points in `range`, order preserved.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self(self.0[range].to_vec())
    }

    /// `(re, im)` pairs, i.e. plot coordinates.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.0.iter().map(|p| (p.re, p.im)).collect()
    }

    /// Phase of each point in `(-π, π]`.
    pub fn angles(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.arg()).collect()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.norm()).collect()
    }

    /// True when both atlases have the same length and every pair of points
    /// agrees within `rel_tol`, relative to the larger magnitude (at least 1).
    pub fn approx_eq(&self, other: &Atlas, rel_tol: f64) -> bool {
        self.len() == other.len()
            && self.0.iter().zip(other.0.iter()).all(|(a, b)| {
                let scale = a.norm().max(b.norm()).max(1.0);
                (a - b).norm() <= rel_tol * scale
            })
    }
}

impl From<Vec<Complex64>> for Atlas {
    fn from(points: Vec<Complex64>) -> Self {
        Self(points)
    }
}

/// Indices of one calendar field and the compass that encodes them.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEncoding {
    pub name: String,
    pub indices: Vec<i64>,
    pub spec: PeriodSpec,
}

impl FieldEncoding {
    pub fn new(name: impl Into<String>, indices: Vec<i64>, spec: PeriodSpec) -> Self {
        Self {
            name: name.into(),
            indices,
            spec,
        }
    }
}

/// Builder that collects named fields and sums their compass points.
#[derive(Debug, Clone, Default)]
pub struct AtlasComposer {
    fields: Vec<FieldEncoding>,
}

impl AtlasComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, indices: Vec<i64>, spec: PeriodSpec) -> Self {
        self.fields.push(FieldEncoding::new(name, indices, spec));
        self
    }

    pub fn push(&mut self, field: FieldEncoding) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[FieldEncoding] {
        &self.fields
    }

    pub fn compose(&self) -> Result<Atlas> {
        compose(&self.fields)
    }
}

/// Sum the compass points of every field into one atlas.
///
/// All index sequences must share one length; field names must be unique.
/// With no fields the atlas is empty.
pub fn compose(fields: &[FieldEncoding]) -> Result<Atlas> {
    let Some(first) = fields.first() else {
        return Ok(Atlas::default());
    };
    let n = first.indices.len();

    for (i, field) in fields.iter().enumerate() {
        if field.indices.len() != n {
            return Err(AtlasError::length_mismatch(
                format!("field '{}'", field.name),
                n,
                field.indices.len(),
            ));
        }
        if fields[..i].iter().any(|f| f.name == field.name) {
            return Err(AtlasError::DuplicateField(field.name.clone()));
        }
    }

    let mut sum = vec![Complex64::new(0.0, 0.0); n];
    for field in fields {
        let points = encode_spec(&field.indices, &field.spec)?;
        for (acc, p) in sum.iter_mut().zip(points) {
            *acc += p;
        }
    }

    debug!(fields = fields.len(), points = n, "Composed atlas");
    Ok(Atlas(sum))
}
