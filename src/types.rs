//! Numeric primitives shared by every diagram: data ranges, viewports, angles.
//!
//! Constructors named `try_new` validate user-provided values; plain `new`
//! constructors accept anything and the geometry code recovers from bad input
//! locally (see [`Range::normalized`]).

use std::fmt;

use thiserror::Error;

use crate::geometry::defaults;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NumericError {
    #[error("value is NaN")]
    NaN,
    #[error("value is infinite")]
    Infinite,
    /// Value is zero when non-zero required
    #[error("value is zero")]
    Zero,
    /// Value is negative when positive required
    #[error("value is negative")]
    Negative,
    /// Upper bound is not greater than the lower bound
    #[error("max is not greater than min")]
    Inverted,
}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

fn check_positive(val: f64) -> Result<f64, NumericError> {
    let val = check_non_negative(val)?;
    if val == 0.0 { Err(NumericError::Zero) } else { Ok(val) }
}

fn check_non_negative(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val < 0.0 { Err(NumericError::Negative) } else { Ok(val) }
}

/// Closed interval of data values along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Create a range without validation.
    pub const fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }

    /// Create a range with validation (finite bounds, `max > min`).
    pub fn try_new(min: f64, max: f64) -> Result<Self, NumericError> {
        let min = check_finite(min)?;
        let max = check_finite(max)?;
        if max - min < defaults::EPSILON {
            return Err(NumericError::Inverted);
        }
        Ok(Range { min, max })
    }

    /// A symmetric range `[-half, half]`.
    pub fn symmetric(half: f64) -> Self {
        Range::new(-half.abs(), half.abs())
    }

    /// True when the range cannot be mapped as-is: inverted, degenerate or non-finite.
    pub fn is_degenerate(self) -> bool {
        !self.min.is_finite() || !self.max.is_finite() || self.max - self.min < defaults::EPSILON
    }

    /// Return a range that is safe to divide by.
    ///
    /// A degenerate or inverted range becomes a unit range centered on the
    /// midpoint of the given bounds, so the midpoint maps to the middle of the
    /// plotting area. Non-finite bounds center on zero.
    pub fn normalized(self) -> Self {
        if !self.is_degenerate() {
            return self;
        }
        let center = (self.min + self.max) / 2.0;
        let center = if center.is_finite() { center } else { 0.0 };
        Range::new(center - 0.5, center + 0.5)
    }

    /// Width of the range (of the normalized range if degenerate).
    pub fn span(self) -> f64 {
        let r = self.normalized();
        r.max - r.min
    }

    /// Midpoint of the range.
    pub fn midpoint(self) -> f64 {
        let r = self.normalized();
        (r.min + r.max) / 2.0
    }

    /// Whether `value` lies inside the range (inclusive).
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into the range.
    pub fn clamp(self, value: f64) -> f64 {
        let r = self.normalized();
        value.clamp(r.min, r.max)
    }

    /// Grow the range by `factor * span` on both sides.
    pub fn expanded(self, factor: f64) -> Self {
        let r = self.normalized();
        let pad = r.span() * factor;
        Range::new(r.min - pad, r.max + pad)
    }

    /// Pick a 1, 2 or 5 × 10ⁿ step that yields roughly `target_count` ticks.
    pub fn nice_step(self, target_count: usize) -> f64 {
        let raw = self.span() / target_count.max(1) as f64;
        let magnitude = 10_f64.powf(raw.log10().floor());
        let residual = raw / magnitude;
        let nice = if residual <= 1.0 {
            1.0
        } else if residual <= 2.0 {
            2.0
        } else if residual <= 5.0 {
            5.0
        } else {
            10.0
        };
        nice * magnitude
    }

    /// All multiples of `step` inside the range, ascending.
    ///
    /// Endpoints are included when they are multiples of `step` up to a small
    /// tolerance. A non-positive or non-finite step yields no ticks.
    pub fn ticks(self, step: f64) -> Vec<f64> {
        if !(step.is_finite() && step > 0.0) {
            return Vec::new();
        }
        let r = self.normalized();
        let tolerance = step * 1e-9;
        let first = ((r.min - tolerance) / step).ceil() as i64;
        let last = ((r.max + tolerance) / step).floor() as i64;
        (first..=last)
            .map(|k| {
                let v = k as f64 * step;
                // -0.0 renders as "-0" in labels
                if v == 0.0 { 0.0 } else { v }
            })
            .collect()
    }
}

impl Default for Range {
    fn default() -> Self {
        Range::new(-10.0, 10.0)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Pixel padding around the plotting area.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Padding {
    /// Same padding on every side.
    pub const fn uniform(px: f64) -> Self {
        Padding {
            left: px,
            right: px,
            top: px,
            bottom: px,
        }
    }

    /// Horizontal and vertical padding.
    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Padding {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }
}

/// Pixel dimensions of a rendering surface plus padding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl Viewport {
    /// Create a viewport without validation.
    pub const fn new(width: f64, height: f64, padding: Padding) -> Self {
        Viewport {
            width,
            height,
            padding,
        }
    }

    /// Create a viewport with validation (finite positive size, non-negative padding).
    pub fn try_new(width: f64, height: f64, padding: Padding) -> Result<Self, NumericError> {
        let width = check_positive(width)?;
        let height = check_positive(height)?;
        check_non_negative(padding.left)?;
        check_non_negative(padding.right)?;
        check_non_negative(padding.top)?;
        check_non_negative(padding.bottom)?;
        Ok(Viewport::new(width, height, padding))
    }

    /// The padded plotting rectangle.
    pub fn plot_area(&self) -> PlotArea {
        PlotArea {
            left: self.padding.left,
            top: self.padding.top,
            right: self.width - self.padding.right,
            bottom: self.height - self.padding.bottom,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(
            defaults::VIEWPORT_WIDTH,
            defaults::VIEWPORT_HEIGHT,
            Padding::uniform(defaults::VIEWPORT_PADDING),
        )
    }
}

/// Pixel rectangle that data is mapped into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when padding has swallowed the whole surface.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Whether a pixel lies inside the rectangle (inclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Angle in degrees, math convention (0° along +x, counter-clockwise positive).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle(pub f64);

impl Angle {
    pub const fn degrees(deg: f64) -> Self {
        Angle(deg)
    }

    pub fn from_radians(rad: f64) -> Self {
        Angle(rad.to_degrees())
    }

    pub fn raw(self) -> f64 {
        self.0
    }

    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// The same direction expressed in `[0, 360)`.
    pub fn normalized(self) -> Angle {
        let n = self.0.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        Angle(if n >= 360.0 { 0.0 } else { n })
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// One sample in data space. `y == None` marks a break in the curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: Option<f64>,
}

impl SamplePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        SamplePoint { x, y: Some(y) }
    }

    pub const fn gap(x: f64) -> Self {
        SamplePoint { x, y: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Range tests ====================

    #[test]
    fn range_try_new_valid() {
        assert!(Range::try_new(-1.0, 1.0).is_ok());
    }

    #[test]
    fn range_try_new_rejects_inverted_and_degenerate() {
        assert_eq!(Range::try_new(1.0, -1.0), Err(NumericError::Inverted));
        assert_eq!(Range::try_new(2.0, 2.0), Err(NumericError::Inverted));
    }

    #[test]
    fn range_try_new_rejects_non_finite() {
        assert_eq!(Range::try_new(f64::NAN, 1.0), Err(NumericError::NaN));
        assert_eq!(Range::try_new(0.0, f64::INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn numeric_error_messages() {
        let err: Box<dyn std::error::Error> = Box::new(NumericError::Inverted);
        assert_eq!(err.to_string(), "max is not greater than min");
        assert_eq!(NumericError::Zero.to_string(), "value is zero");
    }

    #[test]
    fn range_normalized_keeps_valid_range() {
        let r = Range::new(-3.0, 5.0);
        assert_eq!(r.normalized(), r);
        assert_eq!(r.span(), 8.0);
        assert_eq!(r.midpoint(), 1.0);
    }

    #[test]
    fn range_normalized_degenerate_is_unit_centered() {
        let r = Range::new(4.0, 4.0).normalized();
        assert_eq!(r, Range::new(3.5, 4.5));
        assert_eq!(r.span(), 1.0);
    }

    #[test]
    fn range_normalized_inverted_is_unit_centered() {
        let r = Range::new(6.0, 2.0).normalized();
        assert_eq!(r, Range::new(3.5, 4.5));
    }

    #[test]
    fn range_normalized_non_finite_centers_on_zero() {
        let r = Range::new(f64::NEG_INFINITY, f64::INFINITY).normalized();
        assert_eq!(r, Range::new(-0.5, 0.5));
    }

    #[test]
    fn range_contains_and_clamp() {
        let r = Range::new(0.0, 10.0);
        assert!(r.contains(0.0));
        assert!(r.contains(10.0));
        assert!(!r.contains(10.5));
        assert_eq!(r.clamp(-2.0), 0.0);
        assert_eq!(r.clamp(12.0), 10.0);
    }

    #[test]
    fn range_nice_step() {
        assert_eq!(Range::new(0.0, 10.0).nice_step(10), 1.0);
        assert_eq!(Range::new(0.0, 100.0).nice_step(5), 20.0);
        assert_eq!(Range::new(-10.0, 10.0).nice_step(4), 5.0);
    }

    #[test]
    fn range_ticks_include_endpoints() {
        let ticks = Range::new(-2.0, 2.0).ticks(1.0);
        assert_eq!(ticks, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn range_ticks_skip_non_multiples() {
        let ticks = Range::new(-0.5, 2.5).ticks(1.0);
        assert_eq!(ticks, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn range_ticks_bad_step_is_empty() {
        assert!(Range::new(0.0, 1.0).ticks(0.0).is_empty());
        assert!(Range::new(0.0, 1.0).ticks(-1.0).is_empty());
        assert!(Range::new(0.0, 1.0).ticks(f64::NAN).is_empty());
    }

    // ==================== Viewport tests ====================

    #[test]
    fn viewport_plot_area_applies_asymmetric_padding() {
        let vp = Viewport::new(
            400.0,
            300.0,
            Padding {
                left: 40.0,
                right: 10.0,
                top: 20.0,
                bottom: 30.0,
            },
        );
        let area = vp.plot_area();
        assert_eq!(area.left, 40.0);
        assert_eq!(area.right, 390.0);
        assert_eq!(area.top, 20.0);
        assert_eq!(area.bottom, 270.0);
        assert_eq!(area.width(), 350.0);
        assert_eq!(area.height(), 250.0);
        assert!(!area.is_empty());
    }

    #[test]
    fn viewport_oversized_padding_collapses_area() {
        let vp = Viewport::new(100.0, 100.0, Padding::uniform(60.0));
        assert!(vp.plot_area().is_empty());
    }

    #[test]
    fn viewport_try_new_rejects_negative() {
        assert_eq!(
            Viewport::try_new(-1.0, 10.0, Padding::default()),
            Err(NumericError::Negative)
        );
        assert_eq!(
            Viewport::try_new(10.0, 10.0, Padding::uniform(-2.0)),
            Err(NumericError::Negative)
        );
        assert_eq!(
            Viewport::try_new(0.0, 10.0, Padding::default()),
            Err(NumericError::Zero)
        );
    }

    // ==================== Angle tests ====================

    #[test]
    fn angle_normalized_wraps() {
        assert_eq!(Angle::degrees(370.0).normalized(), Angle(10.0));
        assert_eq!(Angle::degrees(-90.0).normalized(), Angle(270.0));
        assert_eq!(Angle::degrees(360.0).normalized(), Angle(0.0));
    }

    #[test]
    fn angle_radians_round_trip() {
        let a = Angle::from_radians(std::f64::consts::FRAC_PI_2);
        assert!((a.raw() - 90.0).abs() < 1e-12);
        assert!((a.to_radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
