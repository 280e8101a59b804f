//! Per-point color, size and label derived from a symbol sequence.

use crate::config::{ColorScale, RenderConfig, SizeMode};
use crate::constants::MIN_SIZE_FRACTION;
use crate::types::{Symbol, SymbolSequence};
use plotters::style::RGBColor;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PointStyle {
    pub color: RGBColor,
    /// Marker radius in pixels
    pub radius: i32,
    pub label: String,
}

/// Map symbols into `[0, 1]`.
///
/// Numbers are scaled by `scale`; as soon as one symbol is text the whole
/// sequence is treated as categories, numbered in order of first appearance.
pub fn normalize(symbols: &SymbolSequence, scale: ColorScale) -> Vec<f64> {
    let values = match numeric_values(symbols) {
        Some(values) => values,
        None => categories(symbols),
    };

    match scale {
        ColorScale::MinMax => min_max(&values),
        ColorScale::Periodic { period } => {
            let period = period.max(1) as f64;
            values.iter().map(|v| v.rem_euclid(period) / period).collect()
        }
    }
}

/// `|v| / max |v|` for numeric symbols, category position otherwise.
pub fn magnitudes(symbols: &SymbolSequence) -> Vec<f64> {
    match numeric_values(symbols) {
        Some(values) => {
            let max = values
                .iter()
                .filter(|v| v.is_finite())
                .fold(0.0f64, |m, v| m.max(v.abs()));
            values
                .iter()
                .map(|v| if max > 0.0 && v.is_finite() { v.abs() / max } else { 0.0 })
                .collect()
        }
        None => min_max(&categories(symbols)),
    }
}

pub fn point_styles(symbols: &SymbolSequence, config: &RenderConfig) -> Vec<PointStyle> {
    let shades = normalize(symbols, config.color_scale);
    let sizes = match config.size_mode {
        SizeMode::Uniform => vec![1.0; symbols.len()],
        SizeMode::Variable => magnitudes(symbols)
            .into_iter()
            .map(|m| MIN_SIZE_FRACTION + (1.0 - MIN_SIZE_FRACTION) * m)
            .collect(),
    };

    symbols
        .iter()
        .zip(shades)
        .zip(sizes)
        .map(|((symbol, shade), size)| PointStyle {
            color: config.colormap.color(shade),
            radius: ((config.base_size * size).round() as i32).max(1),
            label: symbol.to_string(),
        })
        .collect()
}

fn numeric_values(symbols: &SymbolSequence) -> Option<Vec<f64>> {
    symbols.iter().map(Symbol::as_number).collect()
}

fn categories(symbols: &SymbolSequence) -> Vec<f64> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    symbols
        .iter()
        .map(|s| {
            let next = seen.len();
            *seen.entry(s.to_string()).or_insert(next) as f64
        })
        .collect()
}

fn min_max(values: &[f64]) -> Vec<f64> {
    let finite = values.iter().filter(|v| v.is_finite());
    let lo = finite.clone().fold(f64::INFINITY, |a, &b| a.min(b));
    let hi = finite.fold(f64::NEG_INFINITY, |a, &b| a.max(b));

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                0.0
            } else if hi > lo {
                (v - lo) / (hi - lo)
            } else {
                0.5
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colormap::ColorMap;

    #[test]
    fn test_min_max() {
        let s = SymbolSequence::from_numbers(&[-1.0, 0.0, 1.0]);
        assert_eq!(normalize(&s, ColorScale::MinMax), vec![0.0, 0.5, 1.0]);

        let flat = SymbolSequence::from_numbers(&[4.0, 4.0]);
        assert_eq!(normalize(&flat, ColorScale::MinMax), vec![0.5, 0.5]);
    }

    #[test]
    fn test_periodic() {
        let s = SymbolSequence::from_integers(&[0, 6, 24, 30, -6]);
        assert_eq!(
            normalize(&s, ColorScale::Periodic { period: 24 }),
            vec![0.0, 0.25, 0.0, 0.25, 0.75]
        );
    }

    #[test]
    fn test_categories() {
        let s = SymbolSequence::from_labels(&["a", "b", "a", "c"]);
        assert_eq!(normalize(&s, ColorScale::MinMax), vec![0.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn test_variable_sizes_follow_magnitude() {
        let config = RenderConfig {
            size_mode: SizeMode::Variable,
            base_size: 40.0,
            colormap: ColorMap::Gray,
            ..RenderConfig::default()
        };
        let s = SymbolSequence::from_numbers(&[0.0, -0.5, 1.0]);
        let styles = point_styles(&s, &config);
        assert_eq!(styles[0].radius, 10);
        assert_eq!(styles[1].radius, 25);
        assert_eq!(styles[2].radius, 40);
        assert_eq!(styles[2].label, "1");
    }

    #[test]
    fn test_uniform_sizes() {
        let s = SymbolSequence::sequential(5);
        let styles = point_styles(&s, &RenderConfig::default());
        assert!(styles.iter().all(|p| p.radius == 12));
    }

    #[test]
    fn test_empty() {
        let s = SymbolSequence::default();
        assert!(point_styles(&s, &RenderConfig::default()).is_empty());
    }
}
