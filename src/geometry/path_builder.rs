//! Segment builder for sampled curves.
//!
//! Accumulates pixel points into the current run and closes the run whenever
//! continuity is lost. A curve is therefore a list of [`PathSegment`]s that
//! are never joined across a break.
//!
//! # Rules
//!
//! - A break closes the current run if it has any points; consecutive breaks
//!   collapse into one.
//! - A point whose pixel coordinates are not finite is a break.
//! - A point whose data x does not increase past the previous accepted point
//!   starts a new run, so each run is strictly monotonic in x.

use glam::DVec2;

use super::svg::PathData;

/// One continuous run of pixel-space points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathSegment {
    pub points: Vec<DVec2>,
}

impl PathSegment {
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<DVec2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<DVec2> {
        self.points.last().copied()
    }

    /// `M` to the first point, `L` through the rest.
    pub fn to_path_data(&self) -> PathData {
        let mut data = PathData::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            data = data.m(first.x, first.y);
        }
        for p in iter {
            data = data.l(p.x, p.y);
        }
        data
    }
}

/// Path data for a whole curve: one subpath per segment.
pub fn segments_to_path_data(segments: &[PathSegment]) -> PathData {
    segments
        .iter()
        .fold(PathData::new(), |acc, seg| acc.extend(seg.to_path_data()))
}

/// Builder that splits a stream of samples into continuous runs.
#[derive(Debug, Default)]
pub struct SegmentBuilder {
    /// Closed runs
    segments: Vec<PathSegment>,

    /// Run under construction
    current: Vec<DVec2>,

    /// Data x of the last accepted point in `current`
    last_x: Option<f64>,

    /// Samples that were turned into breaks
    rejected: usize,
}

impl SegmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point. `data_x` is the sample's domain value, used for the
    /// monotonicity rule; `pixel` is where it lands on screen.
    pub fn push(&mut self, data_x: f64, pixel: DVec2) {
        if !pixel.is_finite() || !data_x.is_finite() {
            self.mark_break();
            return;
        }
        if let Some(last) = self.last_x {
            if data_x <= last {
                self.close_current();
            }
        }
        self.current.push(pixel);
        self.last_x = Some(data_x);
    }

    /// Record a sample that cannot be drawn.
    pub fn mark_break(&mut self) {
        self.rejected += 1;
        self.close_current();
    }

    fn close_current(&mut self) {
        if !self.current.is_empty() {
            let points = std::mem::take(&mut self.current);
            self.segments.push(PathSegment::new(points));
        }
        self.last_x = None;
    }

    /// Number of samples turned into breaks so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Close the open run and return every segment.
    pub fn build(mut self) -> Vec<PathSegment> {
        self.close_current();
        self.segments
    }
}
