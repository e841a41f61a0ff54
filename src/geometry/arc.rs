//! Circular arcs for angle marks
//!
//! Angles are math-convention degrees: 0° points along +x and positive angles
//! turn counter-clockwise. Pixel space is y-down, so a point at angle θ sits at
//! `center + r * (cos θ, -sin θ)`.
//!
//! [`arc_path`] always draws the shorter of the two arcs between its angles.
//! Under that policy the large-arc flag is never set and the sweep runs
//! counter-clockwise on screen, which is SVG sweep flag `0`. Reflex angles go
//! through [`arc_path_explicit`].

use glam::{DVec2, dvec2};

use crate::types::Angle;

use super::defaults;
use super::svg::PathData;

/// Point on a circle at a math-convention angle, in y-down pixel space
pub fn point_on_circle(center: DVec2, radius: f64, angle: Angle) -> DVec2 {
    let rad = angle.to_radians();
    center + radius * dvec2(rad.cos(), -rad.sin())
}

/// A resolved arc: endpoints, sweep and SVG flags.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcPath {
    pub center: DVec2,
    pub radius: f64,
    /// Angle the drawn arc starts at (after any swap)
    pub start_angle: Angle,
    /// Angle the drawn arc ends at (after any swap)
    pub end_angle: Angle,
    pub start: DVec2,
    pub end: DVec2,
    /// Degrees covered by the drawn arc, in `[0, 360)`
    pub sweep_degrees: f64,
    pub large_arc: bool,
    /// SVG sweep flag
    pub sweep: bool,
}

/// Shorter arc between two angles.
///
/// When the counter-clockwise difference from `start_deg` to `end_deg` exceeds
/// 180°, the endpoints are swapped so the other, shorter way round is drawn.
pub fn arc_path(center: DVec2, radius: f64, start_deg: f64, end_deg: f64) -> ArcPath {
    let mut start = Angle::degrees(start_deg).normalized();
    let mut end = Angle::degrees(end_deg).normalized();
    let mut diff = (end.raw() - start.raw()).rem_euclid(360.0);
    if diff > 180.0 {
        std::mem::swap(&mut start, &mut end);
        diff = (end.raw() - start.raw()).rem_euclid(360.0);
    }
    build(center, radius, start, end, diff, diff > 180.0, false)
}

/// Arc with caller-chosen flags and no normalization.
///
/// `sweep == false` runs counter-clockwise on screen from `start_deg`, `true`
/// runs clockwise.
pub fn arc_path_explicit(
    center: DVec2,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    large_arc: bool,
    sweep: bool,
) -> ArcPath {
    let start = Angle::degrees(start_deg);
    let end = Angle::degrees(end_deg);
    let ccw = (end_deg - start_deg).rem_euclid(360.0);
    let diff = if sweep { (360.0 - ccw).rem_euclid(360.0) } else { ccw };
    build(center, radius, start, end, diff, large_arc, sweep)
}

fn build(
    center: DVec2,
    radius: f64,
    start_angle: Angle,
    end_angle: Angle,
    sweep_degrees: f64,
    large_arc: bool,
    sweep: bool,
) -> ArcPath {
    // rem_euclid can return 360 for tiny negative differences
    let sweep_degrees = if sweep_degrees.is_finite() && 360.0 - sweep_degrees > defaults::EPSILON {
        sweep_degrees
    } else {
        0.0
    };
    ArcPath {
        center,
        radius,
        start_angle,
        end_angle,
        start: point_on_circle(center, radius, start_angle),
        end: point_on_circle(center, radius, end_angle),
        sweep_degrees,
        large_arc,
        sweep,
    }
}

impl ArcPath {
    /// Zero sweep or no usable radius; renderers skip these.
    pub fn is_degenerate(&self) -> bool {
        self.sweep_degrees.abs() < defaults::EPSILON
            || !(self.radius.is_finite() && self.radius > 0.0)
    }

    /// Angle halfway along the drawn arc
    pub fn bisector(&self) -> Angle {
        let direction = if self.sweep { -1.0 } else { 1.0 };
        Angle::degrees(self.start_angle.raw() + direction * self.sweep_degrees / 2.0).normalized()
    }

    /// Where an angle label goes: on the bisector, `offset` beyond the arc.
    pub fn label_anchor(&self, offset: f64) -> DVec2 {
        point_on_circle(self.center, self.radius + offset, self.bisector())
    }

    /// `d` for the arc stroke. A degenerate arc is a bare move-to.
    pub fn to_path_data(&self) -> PathData {
        let data = PathData::new().m(self.start.x, self.start.y);
        if self.is_degenerate() {
            return data;
        }
        data.a(
            self.radius,
            self.radius,
            0.0,
            self.large_arc,
            self.sweep,
            self.end.x,
            self.end.y,
        )
    }

    /// `d` for a filled wedge: center, out to the arc, around, and back.
    pub fn sector_path(&self) -> PathData {
        if self.is_degenerate() {
            return self.to_path_data();
        }
        PathData::new()
            .m(self.center.x, self.center.y)
            .l(self.start.x, self.start.y)
            .a(
                self.radius,
                self.radius,
                0.0,
                self.large_arc,
                self.sweep,
                self.end.x,
                self.end.y,
            )
            .z()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    const C: DVec2 = DVec2::new(100.0, 100.0);

    // ==================== point_on_circle tests ====================

    #[test]
    fn points_follow_math_convention_in_y_down_space() {
        let p = point_on_circle(C, 50.0, Angle::degrees(0.0));
        assert_close(p.x, 150.0);
        assert_close(p.y, 100.0);
        let p = point_on_circle(C, 50.0, Angle::degrees(90.0));
        assert_close(p.x, 100.0);
        assert_close(p.y, 50.0);
        let p = point_on_circle(C, 50.0, Angle::degrees(180.0));
        assert_close(p.x, 50.0);
    }

    // ==================== arc_path tests ====================

    #[test]
    fn short_arc_across_zero() {
        let arc = arc_path(C, 50.0, 350.0, 10.0);
        assert_close(arc.sweep_degrees, 20.0);
        assert_eq!(arc.start_angle, Angle::degrees(350.0));
        assert_eq!(arc.end_angle, Angle::degrees(10.0));
        assert!(!arc.large_arc);
        assert!(!arc.sweep);
        // the bisector is the +x direction
        let label = arc.label_anchor(10.0);
        assert_close(label.x, 160.0);
        assert_close(label.y, 100.0);
    }

    #[test]
    fn long_way_round_is_swapped() {
        let arc = arc_path(C, 50.0, 10.0, 350.0);
        assert_close(arc.sweep_degrees, 20.0);
        assert_eq!(arc.start_angle, Angle::degrees(350.0));
        assert_eq!(arc.end_angle, Angle::degrees(10.0));
    }

    #[test]
    fn arc_path_never_sets_large_arc() {
        for start in (0..360).step_by(15) {
            for end in (0..360).step_by(20) {
                let arc = arc_path(C, 40.0, start as f64, end as f64);
                assert!(!arc.large_arc);
                assert!(arc.sweep_degrees <= 180.0);
            }
        }
    }

    #[test]
    fn equal_angles_are_degenerate() {
        let arc = arc_path(C, 50.0, 45.0, 405.0);
        assert!(arc.is_degenerate());
        insta::assert_snapshot!(arc.to_path_data().to_string(), @"M135.355,64.6447");
    }

    #[test]
    fn zero_radius_is_degenerate() {
        assert!(arc_path(C, 0.0, 0.0, 90.0).is_degenerate());
    }

    #[test]
    fn quarter_arc_path_data() {
        let arc = arc_path(C, 50.0, 0.0, 90.0);
        insta::assert_snapshot!(arc.to_path_data().to_string(), @"M150,100 A50,50 0 0,0 100,50");
        insta::assert_snapshot!(arc.sector_path().to_string(), @"M100,100 L150,100 A50,50 0 0,0 100,50 Z");
    }

    #[test]
    fn label_anchor_on_bisector() {
        let arc = arc_path(C, 50.0, 0.0, 90.0);
        let p = arc.label_anchor(10.0);
        let expected = point_on_circle(C, 60.0, Angle::degrees(45.0));
        assert_close(p.x, expected.x);
        assert_close(p.y, expected.y);
    }

    // ==================== arc_path_explicit tests ====================

    #[test]
    fn explicit_reflex_arc() {
        let arc = arc_path_explicit(C, 50.0, 0.0, 270.0, true, false);
        assert_close(arc.sweep_degrees, 270.0);
        assert!(arc.large_arc);
        insta::assert_snapshot!(arc.to_path_data().to_string(), @"M150,100 A50,50 0 1,0 100,150");
    }

    #[test]
    fn explicit_clockwise_bisector() {
        let arc = arc_path_explicit(C, 50.0, 90.0, 0.0, false, true);
        assert_close(arc.sweep_degrees, 90.0);
        assert_close(arc.bisector().raw(), 45.0);
    }
}
