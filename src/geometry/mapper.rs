//! Data-space ↔ pixel-space mapping
//!
//! The free functions [`to_pixel`] and [`to_data`] are the whole contract:
//! everything else in this module is convenience that feeds them explicit
//! ranges and extents. No function here can divide by zero: a degenerate range
//! collapses onto the middle of the plotting span.

use glam::{DVec2, dvec2};

use crate::types::{PlotArea, Range, Viewport};

use super::defaults;

/// Map a data value into `[pad_start, pixel_span - pad_end]`.
///
/// With `invert`, larger values map to smaller pixel coordinates (the usual
/// y-axis convention on screen). Every value on a degenerate range lands on
/// the middle of the span.
pub fn to_pixel(
    value: f64,
    range: Range,
    pixel_span: f64,
    pad_start: f64,
    pad_end: f64,
    invert: bool,
) -> f64 {
    let extent = pixel_span - pad_start - pad_end;
    if range.is_degenerate() {
        return pad_start + extent / 2.0;
    }
    let t = (value - range.min) / range.span();
    let t = if invert { 1.0 - t } else { t };
    pad_start + t * extent
}

/// Exact inverse of [`to_pixel`] for a non-degenerate range and extent.
///
/// A degenerate range or a collapsed extent (padding eats the whole span) maps
/// every pixel to the range midpoint.
pub fn to_data(
    pixel: f64,
    range: Range,
    pixel_span: f64,
    pad_start: f64,
    pad_end: f64,
    invert: bool,
) -> f64 {
    let extent = pixel_span - pad_start - pad_end;
    if range.is_degenerate() || extent.abs() < defaults::EPSILON {
        return range.normalized().midpoint();
    }
    let t = (pixel - pad_start) / extent;
    let t = if invert { 1.0 - t } else { t };
    range.min + t * range.span()
}

/// Snap `value` to the nearest multiple of `step`.
///
/// A non-positive or non-finite step leaves the value unchanged.
pub fn snap(value: f64, step: f64) -> f64 {
    if !(step.is_finite() && step > 0.0) {
        return value;
    }
    let snapped = (value / step).round() * step;
    if snapped == 0.0 { 0.0 } else { snapped }
}

/// One axis: a data range laid over a padded pixel span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axis {
    pub range: Range,
    pub pixel_span: f64,
    pub pad_start: f64,
    pub pad_end: f64,
    pub inverted: bool,
}

impl Axis {
    pub fn new(range: Range, pixel_span: f64, pad_start: f64, pad_end: f64) -> Self {
        Axis {
            range,
            pixel_span,
            pad_start,
            pad_end,
            inverted: false,
        }
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn to_pixel(&self, value: f64) -> f64 {
        to_pixel(
            value,
            self.range,
            self.pixel_span,
            self.pad_start,
            self.pad_end,
            self.inverted,
        )
    }

    pub fn to_data(&self, pixel: f64) -> f64 {
        to_data(
            pixel,
            self.range,
            self.pixel_span,
            self.pad_start,
            self.pad_end,
            self.inverted,
        )
    }

    /// Usable pixel length of the axis
    pub fn extent(&self) -> f64 {
        self.pixel_span - self.pad_start - self.pad_end
    }

    /// Pixels per data unit
    pub fn scale(&self) -> f64 {
        self.extent() / self.range.span()
    }

    /// Pixel positions of the ticks at multiples of `step`
    pub fn tick_pixels(&self, step: f64) -> Vec<(f64, f64)> {
        self.range
            .ticks(step)
            .into_iter()
            .map(|v| (v, self.to_pixel(v)))
            .collect()
    }
}

/// Maps between a data rectangle and a viewport's plotting area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotMapper {
    pub x: Axis,
    pub y: Axis,
}

impl PlotMapper {
    /// Standard orientation: x grows right, y grows up.
    pub fn new(x_range: Range, y_range: Range, viewport: Viewport) -> Self {
        let p = viewport.padding;
        if viewport.plot_area().is_empty() {
            crate::log::warn!(
                width = viewport.width,
                height = viewport.height,
                "padding leaves no plotting area"
            );
        }
        PlotMapper {
            x: Axis::new(x_range, viewport.width, p.left, p.right),
            y: Axis::new(y_range, viewport.height, p.top, p.bottom).inverted(true),
        }
    }

    /// Override the y direction (`true` is the default, data-up is pixel-up).
    pub fn with_inverted_y(mut self, inverted: bool) -> Self {
        self.y.inverted = inverted;
        self
    }

    /// Grow one of the ranges so both axes share a pixels-per-unit scale.
    ///
    /// Circles stay round. The axis with more room per unit gets its range
    /// widened around its midpoint; the other range is untouched.
    pub fn with_equal_aspect(mut self) -> Self {
        let (sx, sy) = (self.x.scale(), self.y.scale());
        if !(sx.is_finite() && sy.is_finite()) || sx <= 0.0 || sy <= 0.0 {
            return self;
        }
        if sx > sy {
            self.x.range = widen(self.x.range, self.x.extent() / sy);
        } else if sy > sx {
            self.y.range = widen(self.y.range, self.y.extent() / sx);
        }
        self
    }

    pub fn x_range(&self) -> Range {
        self.x.range
    }

    pub fn y_range(&self) -> Range {
        self.y.range
    }

    pub fn plot_area(&self) -> PlotArea {
        PlotArea {
            left: self.x.pad_start,
            top: self.y.pad_start,
            right: self.x.pixel_span - self.x.pad_end,
            bottom: self.y.pixel_span - self.y.pad_end,
        }
    }

    pub fn to_pixel(&self, data: DVec2) -> DVec2 {
        dvec2(self.x.to_pixel(data.x), self.y.to_pixel(data.y))
    }

    pub fn to_data(&self, pixel: DVec2) -> DVec2 {
        dvec2(self.x.to_data(pixel.x), self.y.to_data(pixel.y))
    }

    /// Pointer pixel to data coordinates, snapped to a `step` grid.
    pub fn pixel_to_snapped_data(&self, pixel: DVec2, step: f64) -> DVec2 {
        let data = self.to_data(pixel);
        dvec2(snap(data.x, step), snap(data.y, step))
    }

    /// Pixel position of the data origin, clamped into the plotting area so
    /// axes stay on screen when zero is out of range.
    pub fn origin_pixel(&self) -> DVec2 {
        let x = self.x.range.clamp(0.0);
        let y = self.y.range.clamp(0.0);
        self.to_pixel(dvec2(x, y))
    }
}

fn widen(range: Range, span: f64) -> Range {
    let mid = range.midpoint();
    Range::new(mid - span / 2.0, mid + span / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Padding;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn to_pixel_maps_endpoints_to_padded_edges() {
        let r = Range::new(-10.0, 10.0);
        assert_close(to_pixel(-10.0, r, 400.0, 20.0, 20.0, false), 20.0);
        assert_close(to_pixel(10.0, r, 400.0, 20.0, 20.0, false), 380.0);
        assert_close(to_pixel(0.0, r, 400.0, 20.0, 20.0, false), 200.0);
    }

    #[test]
    fn to_pixel_inverted_flips() {
        let r = Range::new(0.0, 10.0);
        assert_close(to_pixel(10.0, r, 300.0, 10.0, 30.0, true), 10.0);
        assert_close(to_pixel(0.0, r, 300.0, 10.0, 30.0, true), 270.0);
    }

    #[test]
    fn asymmetric_padding() {
        let r = Range::new(0.0, 1.0);
        // plotting span is [40, 390]
        assert_close(to_pixel(0.5, r, 400.0, 40.0, 10.0, false), 215.0);
    }

    #[test]
    fn to_data_inverts_to_pixel() {
        let r = Range::new(-3.0, 7.0);
        for &invert in &[false, true] {
            for i in 0..=20 {
                let p = 15.0 + i as f64 * 13.5;
                let v = to_data(p, r, 300.0, 15.0, 15.0, invert);
                assert_close(to_pixel(v, r, 300.0, 15.0, 15.0, invert), p);
            }
        }
    }

    #[test]
    fn degenerate_range_maps_to_midpoint() {
        let r = Range::new(5.0, 5.0);
        let p = to_pixel(5.0, r, 200.0, 20.0, 20.0, true);
        assert!(p.is_finite());
        assert_close(p, 100.0);
    }

    #[test]
    fn degenerate_range_ignores_far_values() {
        let r = Range::new(5.0, 5.0);
        for value in [1e306, -1e306, f64::MAX, 42.0] {
            let p = to_pixel(value, r, 400.0, 20.0, 20.0, true);
            assert_close(p, 200.0);
        }
        // inverted bounds collapse the same way
        assert_close(to_pixel(1e300, Range::new(3.0, 1.0), 400.0, 20.0, 20.0, false), 200.0);
        assert_close(to_data(1e300, r, 400.0, 20.0, 20.0, true), 5.0);
    }

    #[test]
    fn collapsed_extent_does_not_divide_by_zero() {
        let r = Range::new(0.0, 4.0);
        let v = to_data(50.0, r, 100.0, 50.0, 50.0, false);
        assert_close(v, 2.0);
    }

    #[test]
    fn snap_rounds_to_step() {
        assert_close(snap(1.26, 0.5), 1.5);
        assert_close(snap(-0.2, 1.0), 0.0);
        assert_close(snap(3.3, 0.0), 3.3);
    }

    #[test]
    fn plot_mapper_round_trip() {
        let vp = Viewport::new(
            500.0,
            300.0,
            Padding {
                left: 40.0,
                right: 20.0,
                top: 10.0,
                bottom: 30.0,
            },
        );
        let m = PlotMapper::new(Range::new(-5.0, 5.0), Range::new(0.0, 100.0), vp);
        let data = dvec2(1.25, 42.0);
        let back = m.to_data(m.to_pixel(data));
        assert_close(back.x, data.x);
        assert_close(back.y, data.y);
    }

    #[test]
    fn plot_mapper_y_grows_up() {
        let vp = Viewport::new(100.0, 100.0, Padding::default());
        let m = PlotMapper::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0), vp);
        assert!(m.to_pixel(dvec2(0.0, 9.0)).y < m.to_pixel(dvec2(0.0, 1.0)).y);

        let m = m.with_inverted_y(false);
        assert!(m.to_pixel(dvec2(0.0, 9.0)).y > m.to_pixel(dvec2(0.0, 1.0)).y);
    }

    #[test]
    fn pixel_to_snapped_data() {
        let vp = Viewport::new(200.0, 200.0, Padding::default());
        let m = PlotMapper::new(Range::new(-10.0, 10.0), Range::new(-10.0, 10.0), vp);
        // 10 px per unit; (123, 77) is (2.3, 2.3) in data space
        let snapped = m.pixel_to_snapped_data(dvec2(123.0, 77.0), 1.0);
        assert_close(snapped.x, 2.0);
        assert_close(snapped.y, 2.0);
    }

    #[test]
    fn equal_aspect_widens_the_roomier_axis() {
        let vp = Viewport::new(400.0, 200.0, Padding::default());
        let m = PlotMapper::new(Range::new(-1.0, 1.0), Range::new(-1.0, 1.0), vp)
            .with_equal_aspect();
        assert_close(m.x.scale(), m.y.scale());
        assert_eq!(m.y_range(), Range::new(-1.0, 1.0));
        assert_close(m.x_range().min, -2.0);
        assert_close(m.x_range().max, 2.0);
    }

    #[test]
    fn origin_pixel_is_clamped() {
        let vp = Viewport::new(100.0, 100.0, Padding::default());
        let m = PlotMapper::new(Range::new(2.0, 12.0), Range::new(-5.0, 5.0), vp);
        let o = m.origin_pixel();
        assert_close(o.x, 0.0);
        assert_close(o.y, 50.0);
    }

    #[test]
    fn tick_pixels() {
        let axis = Axis::new(Range::new(0.0, 4.0), 100.0, 10.0, 10.0);
        let ticks = axis.tick_pixels(2.0);
        assert_eq!(ticks.len(), 3);
        assert_close(ticks[1].1, 50.0);
    }
}
