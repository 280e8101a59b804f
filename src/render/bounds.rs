use crate::constants::DEGENERATE_SPAN;

/// Axis ranges of a plot, `x = (min, max)`, `y = (min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self {
            x: (-1.0, 1.0),
            y: (-1.0, 1.0),
        }
    }
}

impl AxisBounds {
    /// Smallest box holding every finite point; `None` when there is none.
    pub fn enclosing(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut bounds: Option<Self> = None;
        for (x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                None => Self {
                    x: (x, x),
                    y: (y, y),
                },
                Some(b) => Self {
                    x: (b.x.0.min(x), b.x.1.max(x)),
                    y: (b.y.0.min(y), b.y.1.max(y)),
                },
            });
        }
        bounds
    }

    pub fn width(&self) -> f64 {
        self.x.1 - self.x.0
    }

    pub fn height(&self) -> f64 {
        self.y.1 - self.y.0
    }

    /// Widen each side by `padding` times the axis span.
    pub fn padded(self, padding: f64) -> Self {
        let pad = |(lo, hi): (f64, f64)| {
            let span = if hi > lo { hi - lo } else { DEGENERATE_SPAN };
            (lo - padding * span, hi + padding * span)
        };
        // a zero-span axis still gets a visible range
        let widen = |(lo, hi): (f64, f64)| {
            if hi > lo {
                (lo, hi)
            } else {
                (lo - DEGENERATE_SPAN / 2.0, hi + DEGENERATE_SPAN / 2.0)
            }
        };
        Self {
            x: widen(pad(self.x)),
            y: widen(pad(self.y)),
        }
    }

    /// Grow the shorter axis around its center so both spans match.
    pub fn squared(self) -> Self {
        let span = self.width().max(self.height());
        let center = |(lo, hi): (f64, f64)| {
            let c = (lo + hi) / 2.0;
            (c - span / 2.0, c + span / 2.0)
        };
        Self {
            x: center(self.x),
            y: center(self.y),
        }
    }

    /// Fixed plot bounds for a set of points.
    pub fn for_points(points: &[(f64, f64)], padding: f64, equal_aspect: bool) -> Self {
        let bounds = match Self::enclosing(points.iter().copied()) {
            Some(b) => b.padded(padding),
            None => Self::default(),
        };
        if equal_aspect {
            bounds.squared()
        } else {
            bounds
        }
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x.0 && x <= self.x.1 && y >= self.y.0 && y <= self.y.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing_and_padding() {
        let b = AxisBounds::for_points(&[(0.0, 0.0), (2.0, 1.0)], 0.25, false);
        assert_eq!(b.x, (-0.5, 2.5));
        assert_eq!(b.y, (-0.25, 1.25));
    }

    #[test]
    fn test_equal_aspect() {
        let b = AxisBounds::for_points(&[(0.0, 0.0), (2.0, 1.0)], 0.0, true);
        assert_eq!(b.width(), b.height());
        assert_eq!(b.y, (-0.5, 1.5));
    }

    #[test]
    fn test_single_point_gets_range() {
        let b = AxisBounds::for_points(&[(3.0, -2.0)], 0.2, true);
        assert!(b.width() > 0.0 && b.height() > 0.0);
        assert!(b.contains((3.0, -2.0)));
    }

    #[test]
    fn test_empty_and_non_finite() {
        assert_eq!(AxisBounds::for_points(&[], 0.2, true), AxisBounds::default());
        assert!(AxisBounds::enclosing([(f64::NAN, 0.0)]).is_none());
    }
}
