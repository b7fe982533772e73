//! Linear scales, data extents, and tick generation.

use crate::types::Point;

/// Maps a numeric domain linearly onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub const fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to the range.
    ///
    /// A degenerate (zero-width) domain maps every value to the start of the
    /// range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() > 0.0 {
            r0 + (value - d0) / span * (r1 - r0)
        } else {
            r0
        }
    }

    /// Pixel length of `amount` domain units.
    pub fn length_of(&self, amount: f64) -> f64 {
        self.apply(amount) - self.apply(0.0)
    }

    /// Nice tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }

    /// Spacing between the values returned by [`Self::ticks`].
    pub fn tick_step(&self, count: usize) -> Option<f64> {
        let (lo, hi) = ordered(self.domain);
        tick_step(lo, hi, count)
    }
}

/// Minimum and maximum of the finite values, or `None` if there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Histogram x domain: `[min(x), max(x) + bucket]`, so the last bar keeps a
/// full bucket of width.
pub fn histogram_x_domain(points: &[Point], bucket: f64) -> Option<(f64, f64)> {
    extent(points.iter().map(|p| p.x)).map(|(lo, hi)| (lo, hi + bucket))
}

/// Histogram y domain: `[0, max(y)]`.
pub fn histogram_y_domain(points: &[Point]) -> (f64, f64) {
    let max = extent(points.iter().map(|p| p.y)).map_or(0.0, |(_, hi)| hi);
    (0.0, max)
}

/// Tick values on a 1-2-5 step covering `[min, max]`, about `count` of them.
pub fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = ordered((min, max));
    let Some(step) = tick_step(lo, hi, count) else {
        return if lo.is_finite() { vec![lo] } else { Vec::new() };
    };

    let last = (hi / step).floor();
    let limit = count.saturating_mul(4).max(4);
    let mut ticks = Vec::new();
    let mut i = (lo / step).ceil();
    while i <= last && ticks.len() < limit {
        ticks.push(i * step);
        i += 1.0;
    }
    ticks
}

fn tick_step(lo: f64, hi: f64, count: usize) -> Option<f64> {
    if !lo.is_finite() || !hi.is_finite() || count == 0 {
        return None;
    }
    let span = hi - lo;
    if span <= 0.0 {
        return None;
    }
    let raw = span / count as f64;
    let base = 10f64.powf(raw.log10().floor());
    let n = raw / base;
    let nice = if n <= 1.0 {
        1.0
    } else if n <= 2.0 {
        2.0
    } else if n <= 5.0 {
        5.0
    } else {
        10.0
    };
    Some(nice * base)
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_maps_endpoints() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 500.0));
        assert_eq!(scale.apply(0.0), 0.0);
        assert_eq!(scale.apply(10.0), 500.0);
        assert_eq!(scale.apply(5.0), 250.0);
    }

    #[test]
    fn test_apply_inverted_range() {
        let scale = LinearScale::new((0.0, 4.0), (400.0, 0.0));
        assert_eq!(scale.apply(0.0), 400.0);
        assert_eq!(scale.apply(1.0), 300.0);
    }

    #[test]
    fn test_degenerate_domain_maps_to_range_start() {
        let scale = LinearScale::new((3.0, 3.0), (10.0, 20.0));
        assert_eq!(scale.apply(3.0), 10.0);
        assert_eq!(scale.apply(100.0), 10.0);
    }

    #[test]
    fn test_extent_skips_non_finite() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(extent(Vec::new()), None);
    }

    #[test]
    fn test_histogram_domains() {
        let points = [
            Point::new(0.0, 2.0),
            Point::new(1.0, 5.0),
            Point::new(2.0, 1.0),
        ];
        assert_eq!(histogram_x_domain(&points, 1.0), Some((0.0, 3.0)));
        assert_eq!(histogram_y_domain(&points), (0.0, 5.0));
    }

    #[test]
    fn test_nice_ticks_one_two_five() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(0.0, 3.0, 10), vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn test_nice_ticks_stay_inside_domain() {
        let ticks = nice_ticks(-7.3, 42.1, 10);
        assert!(ticks.iter().all(|t| *t >= -7.3 && *t <= 42.1));
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_nice_ticks_degenerate() {
        assert_eq!(nice_ticks(2.0, 2.0, 10), vec![2.0]);
        assert!(nice_ticks(f64::NAN, 2.0, 10).is_empty());
    }
}
