//! Axis geometry: domain line, tick marks, and tick labels.

use chrono::{DateTime, SecondsFormat};

use super::geometry::{AxisSide, Baseline, TextAnchor};
use super::scale::LinearScale;

/// Length of a tick mark.
pub const TICK_SIZE: f64 = 6.0;

/// Gap between a tick mark and its label.
pub const TICK_PADDING: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis
    pub position: f64,
    pub label: String,
}

/// A laid-out axis, in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisGeometry {
    pub side: AxisSide,
    /// Translation applied to the whole axis
    pub origin: (f64, f64),
    /// Pixel range covered by the domain line
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl AxisGeometry {
    /// Lay out an axis for `scale` with about `count` ticks, labelled by
    /// `format(value, step)`.
    pub fn build<F>(
        scale: &LinearScale,
        side: AxisSide,
        origin: (f64, f64),
        count: usize,
        format: F,
    ) -> Self
    where
        F: Fn(f64, f64) -> String,
    {
        let step = scale.tick_step(count).unwrap_or(1.0);
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|value| Tick {
                position: scale.apply(value),
                label: format(value, step),
            })
            .collect();
        Self {
            side,
            origin,
            range: scale.range(),
            ticks,
        }
    }

    /// Endpoints of the domain line.
    pub fn domain_line(&self) -> ((f64, f64), (f64, f64)) {
        let (r0, r1) = self.range;
        (self.along(r0, 0.0), self.along(r1, 0.0))
    }

    /// Endpoints of a tick mark.
    pub fn tick_mark(&self, tick: &Tick) -> ((f64, f64), (f64, f64)) {
        (
            self.along(tick.position, 0.0),
            self.along(tick.position, TICK_SIZE),
        )
    }

    /// Anchor point and alignment of a tick label.
    pub fn tick_label(&self, tick: &Tick) -> ((f64, f64), TextAnchor, Baseline) {
        let point = self.along(tick.position, TICK_SIZE + TICK_PADDING);
        match self.side {
            AxisSide::Left => (point, TextAnchor::End, Baseline::Middle),
            AxisSide::Bottom => (point, TextAnchor::Middle, Baseline::Hanging),
        }
    }

    /// Point at `position` along the axis, `outward` pixels away from it on
    /// the tick side.
    fn along(&self, position: f64, outward: f64) -> (f64, f64) {
        let (ox, oy) = self.origin;
        match self.side {
            AxisSide::Left => (ox - outward, oy + position),
            AxisSide::Bottom => (ox + position, oy + outward),
        }
    }
}

/// Format a numeric tick with as many decimals as the tick step needs.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_number_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()).clamp(0.0, 12.0) as usize
    } else {
        0
    };
    // Avoid "-0"
    let value = if value.abs() < f64::EPSILON { 0.0 } else { value };
    format!("{value:.decimals$}")
}

/// Format a tick on a millisecond timestamp axis as UTC wall-clock time.
#[allow(clippy::cast_possible_truncation)]
pub fn format_time_tick(millis: f64, step: f64) -> String {
    let Some(time) = DateTime::from_timestamp_millis(millis.round() as i64) else {
        return format_number_tick(millis, step);
    };
    if step < 1000.0 {
        time.format("%H:%M:%S%.3f").to_string()
    } else if step < 86_400_000.0 {
        time.format("%H:%M:%S").to_string()
    } else {
        time.to_rfc3339_opts(SecondsFormat::Secs, true)
            .get(..10)
            .map(str::to_string)
            .unwrap_or_default()
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
    use test_case::test_case;

    #[test]
    fn test_bottom_axis() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        let axis =
            AxisGeometry::build(&scale, AxisSide::Bottom, (0.0, 50.0), 5, format_number_tick);
        assert_eq!(axis.ticks.len(), 6);
        assert_eq!(axis.ticks[1].position, 20.0);
        assert_eq!(axis.ticks[1].label, "2");
        assert_eq!(axis.domain_line(), ((0.0, 50.0), (100.0, 50.0)));
        assert_eq!(axis.tick_mark(&axis.ticks[1]), ((20.0, 50.0), (20.0, 56.0)));
        let (point, anchor, baseline) = axis.tick_label(&axis.ticks[1]);
        assert_eq!(point, (20.0, 59.0));
        assert_eq!(anchor, TextAnchor::Middle);
        assert_eq!(baseline, Baseline::Hanging);
    }

    #[test]
    fn test_left_axis() {
        let scale = LinearScale::new((0.0, 4.0), (400.0, 0.0));
        let axis = AxisGeometry::build(&scale, AxisSide::Left, (0.0, 0.0), 4, format_number_tick);
        assert_eq!(axis.ticks[0].position, 400.0);
        assert_eq!(axis.domain_line(), ((0.0, 400.0), (0.0, 0.0)));
        assert_eq!(axis.tick_mark(&axis.ticks[0]), ((0.0, 400.0), (-6.0, 400.0)));
        let (point, anchor, _) = axis.tick_label(&axis.ticks[0]);
        assert_eq!(point, (-9.0, 400.0));
        assert_eq!(anchor, TextAnchor::End);
    }

    #[test_case(3.0, 1.0, "3")]
    #[test_case(0.5, 0.5, "0.5")]
    #[test_case(0.25, 0.05, "0.25")]
    #[test_case(1500.0, 500.0, "1500")]
    #[test_case(-0.0, 0.1, "0.0")]
    fn test_format_number_tick(value: f64, step: f64, expected: &str) {
        assert_eq!(format_number_tick(value, step), expected);
    }

    #[test]
    fn test_format_time_tick() {
        // 2024-01-02T03:04:05.250Z
        let millis = 1_704_164_645_250.0;
        assert_eq!(format_time_tick(millis, 200.0), "03:04:05.250");
        assert_eq!(format_time_tick(millis, 5000.0), "03:04:05");
        assert_eq!(format_time_tick(millis, 172_800_000.0), "2024-01-02");
    }
}
