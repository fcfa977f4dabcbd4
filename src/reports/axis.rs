//! Chart axis scaling
//!
//! Picks human-friendly tick steps and ceilings for the monthly spending
//! chart. Everything here is pure arithmetic on `f64` amounts in currency
//! units.

/// Number of evenly spaced value labels on the chart's vertical axis
pub const DEFAULT_LABEL_DIVISIONS: u32 = 5;

/// Ceiling used when there is nothing to plot
const EMPTY_CEILING: f64 = 10.0;

/// Tick step for an axis whose data maximum is `max`.
///
/// Tiered, so the result never decreases as `max` grows.
pub fn compute_nice_step(max: f64) -> f64 {
    let max = if max.is_nan() { 0.0 } else { max };

    match max {
        m if m <= 10.0 => 2.0,
        m if m <= 50.0 => 5.0,
        m if m <= 100.0 => 10.0,
        m if m <= 200.0 => 20.0,
        m if m <= 500.0 => 50.0,
        m if m <= 1000.0 => 100.0,
        m if m <= 2000.0 => 200.0,
        m => m / 10.0,
    }
}

/// Round `max` to a "round" ceiling at the same order of magnitude.
///
/// The value is scaled into `[1, 10)` by its power of ten, rounded to one
/// decimal, scaled back, then aligned to the nearest whole number of tick
/// steps (never less than one step). `max <= 0` yields 10.
pub fn round_to_nice(max: f64) -> f64 {
    if max.is_nan() || max <= 0.0 {
        return EMPTY_CEILING;
    }
    if max.is_infinite() {
        return max;
    }

    let magnitude = 10f64.powf(max.log10().floor());
    let normalized = max / magnitude;
    let rounded = (normalized * 10.0).round() / 10.0 * magnitude;

    let step = compute_nice_step(max);
    ((rounded / step).round() * step).max(step)
}

/// Scale of the vertical axis for one chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    /// Largest data value the scale was built for
    pub max: f64,
    /// Top of the axis
    pub ceiling: f64,
    /// Distance between ticks
    pub step: f64,
    /// Number of ticks (at least one)
    pub ticks: u32,
}

impl AxisScale {
    /// Build the scale for data whose maximum is `max`
    pub fn for_max(max: f64) -> Self {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        let step = compute_nice_step(max);
        let ticks = ((max / step).floor() as u32).max(1);

        Self {
            max,
            ceiling: round_to_nice(max),
            step,
            ticks,
        }
    }

    /// `divisions + 1` evenly spaced integer labels from 0 to the ceiling
    pub fn labels(&self, divisions: u32) -> Vec<String> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| format!("{:.0}", f64::from(i) * self.ceiling / f64::from(divisions)))
            .collect()
    }
}
