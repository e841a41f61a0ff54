//! Diagram descriptions and their step plans
//!
//! Every diagram kind is a plain data struct. Which reveal steps a diagram has
//! follows from which of its optional fields are filled in: an empty or absent
//! field contributes no step. [`Diagram`] wraps the kinds in one sum type and
//! forwards [`StepPlan`] to them.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::config::RenderConfig;
use crate::geometry::arc::{ArcPath, arc_path, arc_path_explicit, point_on_circle};
use crate::geometry::collision::{LabelBox, stagger};
use crate::geometry::defaults;
use crate::geometry::mapper::{Axis, PlotMapper};
use crate::geometry::path_builder::PathSegment;
use crate::geometry::sampler::Sampler;
use crate::geometry::tree::{TreeLayout, TreeLayoutConfig, TreeNode, layout_with};
use crate::steps::StepId;
use crate::types::{Angle, Range, Viewport};

/// Step ids shared by the diagram kinds
pub mod step {
    use crate::steps::StepId;

    pub const CIRCLE: StepId = StepId::new("circle");
    pub const CENTER: StepId = StepId::new("center");
    pub const RADIUS: StepId = StepId::new("radius");
    pub const CHORDS: StepId = StepId::new("chords");
    pub const ANGLES: StepId = StepId::new("angles");
    pub const AXES: StepId = StepId::new("axes");
    pub const POINTS: StepId = StepId::new("points");
    pub const FUNCTIONS: StepId = StepId::new("functions");
    pub const SEGMENTS: StepId = StepId::new("segments");
    pub const ROOT: StepId = StepId::new("root");
    pub const BRANCHES: StepId = StepId::new("branches");
    pub const HIGHLIGHT: StepId = StepId::new("highlight");
    pub const TRIANGLE: StepId = StepId::new("triangle");
    pub const SIDES: StepId = StepId::new("sides");
    pub const ERRORS: StepId = StepId::new("errors");
    pub const LINE: StepId = StepId::new("line");
    pub const TICKS: StepId = StepId::new("ticks");
    pub const INTERVALS: StepId = StepId::new("intervals");
    pub const COORDINATES: StepId = StepId::new("coordinates");
}

/// Ordered reveal steps derived from a diagram's data.
#[enum_dispatch]
pub trait StepPlan {
    fn steps(&self) -> Vec<StepId>;
}

/// Any diagram the core knows how to lay out.
#[enum_dispatch(StepPlan)]
#[derive(Debug, Clone, PartialEq)]
pub enum Diagram {
    Circle(CircleDiagram),
    CoordinatePlane(CoordinatePlaneDiagram),
    Tree(TreeDiagram),
    Triangle(TriangleDiagram),
    NumberLine(NumberLineDiagram),
    UnitCircle(UnitCircleDiagram),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    Circle,
    CoordinatePlane,
    Tree,
    Triangle,
    NumberLine,
    UnitCircle,
}

impl DiagramKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagramKind::Circle => "circle",
            DiagramKind::CoordinatePlane => "coordinate-plane",
            DiagramKind::Tree => "tree",
            DiagramKind::Triangle => "triangle",
            DiagramKind::NumberLine => "number-line",
            DiagramKind::UnitCircle => "unit-circle",
        }
    }
}

impl Diagram {
    pub fn kind(&self) -> DiagramKind {
        match self {
            Diagram::Circle(_) => DiagramKind::Circle,
            Diagram::CoordinatePlane(_) => DiagramKind::CoordinatePlane,
            Diagram::Tree(_) => DiagramKind::Tree,
            Diagram::Triangle(_) => DiagramKind::Triangle,
            Diagram::NumberLine(_) => DiagramKind::NumberLine,
            Diagram::UnitCircle(_) => DiagramKind::UnitCircle,
        }
    }
}

/// Steps in order, keeping an optional step only when `present`.
fn plan<const N: usize>(always: &[StepId], optional: [(bool, StepId); N]) -> Vec<StepId> {
    always
        .iter()
        .cloned()
        .chain(
            optional
                .into_iter()
                .filter_map(|(present, id)| present.then_some(id)),
        )
        .collect()
}

// ==================== Circle ====================

/// A chord between two points on the circle
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pub from: Angle,
    pub to: Angle,
    pub label: Option<String>,
}

/// An angle marked at the center
#[derive(Debug, Clone, PartialEq)]
pub struct AngleMark {
    pub start: Angle,
    pub end: Angle,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircleDiagram {
    pub radius: f64,
    /// Drawing the radius is a step of its own when labelled
    pub radius_label: Option<String>,
    pub chords: Vec<Chord>,
    pub angles: Vec<AngleMark>,
}

impl StepPlan for CircleDiagram {
    fn steps(&self) -> Vec<StepId> {
        plan(
            &[step::CIRCLE, step::CENTER],
            [
                (self.radius_label.is_some(), step::RADIUS),
                (!self.chords.is_empty(), step::CHORDS),
                (!self.angles.is_empty(), step::ANGLES),
            ],
        )
    }
}

impl CircleDiagram {
    /// Central-angle arcs around a pixel-space center
    pub fn angle_arcs(&self, center: DVec2, mark_radius: f64) -> Vec<ArcPath> {
        self.angles
            .iter()
            .map(|a| arc_path(center, mark_radius, a.start.raw(), a.end.raw()))
            .collect()
    }

    /// Chord endpoints on a circle of `radius` pixels
    pub fn chord_endpoints(&self, center: DVec2, radius: f64) -> Vec<(DVec2, DVec2)> {
        self.chords
            .iter()
            .map(|c| {
                (
                    point_on_circle(center, radius, c.from),
                    point_on_circle(center, radius, c.to),
                )
            })
            .collect()
    }
}

// ==================== Coordinate plane ====================

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub from: DVec2,
    pub to: DVec2,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoordinatePlaneDiagram {
    pub x_range: Range,
    pub y_range: Range,
    pub points: Vec<PlotPoint>,
    /// Expressions in `x`
    pub functions: Vec<String>,
    pub segments: Vec<LineSegment>,
}

impl StepPlan for CoordinatePlaneDiagram {
    fn steps(&self) -> Vec<StepId> {
        plan(
            &[step::AXES],
            [
                (!self.points.is_empty(), step::POINTS),
                (!self.functions.is_empty(), step::FUNCTIONS),
                (!self.segments.is_empty(), step::SEGMENTS),
            ],
        )
    }
}

impl CoordinatePlaneDiagram {
    pub fn mapper(&self, viewport: Viewport) -> PlotMapper {
        PlotMapper::new(self.x_range, self.y_range, viewport)
    }

    /// One list of segments per function, in order. Functions that fail to
    /// parse come back empty.
    pub fn curves(&self, config: &RenderConfig) -> Vec<Vec<PathSegment>> {
        let sampler = Sampler::new(self.mapper(config.viewport)).with_config(config.sampler);
        self.functions
            .iter()
            .map(|f| sampler.sample_expression(f, self.x_range))
            .collect()
    }

    /// Label boxes for the labelled points, staggered where they collide.
    ///
    /// Box ids are `point-{i}` with `i` the index into `points`, so equal
    /// label texts stay distinguishable.
    pub fn point_labels(&self, config: &RenderConfig) -> Vec<LabelBox> {
        let mapper = self.mapper(config.viewport);
        let boxes: Vec<LabelBox> = self
            .points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let label = p.label.as_ref()?;
                let pixel = mapper.to_pixel(dvec2(p.x, p.y));
                let anchor = pixel - dvec2(0.0, defaults::LABEL_GAP);
                Some(LabelBox::centered(
                    format!("point-{}", i),
                    anchor,
                    label_size(label),
                ))
            })
            .collect();
        stagger(&boxes, config.stagger_offset)
    }
}

fn label_size(text: &str) -> DVec2 {
    dvec2(
        text.chars().count() as f64 * defaults::LABEL_CHAR_WIDTH,
        defaults::LABEL_HEIGHT,
    )
}

// ==================== Tree ====================

#[derive(Debug, Clone, PartialEq)]
pub struct TreeDiagram {
    pub root: TreeNode,
    /// Node ids from the root down to the highlighted node
    pub highlight_path: Option<Vec<String>>,
}

impl StepPlan for TreeDiagram {
    fn steps(&self) -> Vec<StepId> {
        let highlighted = self.highlight_path.as_ref().is_some_and(|p| !p.is_empty());
        plan(
            &[step::ROOT, step::BRANCHES],
            [(highlighted, step::HIGHLIGHT)],
        )
    }
}

impl TreeDiagram {
    /// Layout across the viewport's plotting area.
    pub fn layout(&self, config: &RenderConfig) -> TreeLayout {
        let area = config.viewport.plot_area();
        let tree = TreeLayoutConfig {
            top: area.top + config.tree.top,
            left: area.left + config.tree.left,
            ..config.tree
        };
        layout_with(&self.root, area.width(), &tree)
    }

    /// Consecutive `(parent, child)` pairs along the highlight path
    pub fn highlighted_edges(&self) -> Vec<(String, String)> {
        self.highlight_path
            .as_deref()
            .unwrap_or_default()
            .windows(2)
            .map(|w| (w[0].clone(), w[1].clone()))
            .collect()
    }
}

// ==================== Triangle ====================

#[derive(Debug, Clone, PartialEq)]
pub struct TriangleDiagram {
    /// Pixel-space vertices
    pub vertices: [DVec2; 3],
    /// Labels for sides `[v0v1, v1v2, v2v0]`
    pub side_labels: Option<[String; 3]>,
    /// Labels for the interior angles at each vertex
    pub angles: Option<[String; 3]>,
    /// Mistakes to call out, one message each
    pub errors: Vec<String>,
}

impl StepPlan for TriangleDiagram {
    fn steps(&self) -> Vec<StepId> {
        plan(
            &[step::TRIANGLE],
            [
                (self.side_labels.is_some(), step::SIDES),
                (self.angles.is_some(), step::ANGLES),
                (!self.errors.is_empty(), step::ERRORS),
            ],
        )
    }
}

impl TriangleDiagram {
    /// Interior angle arcs, one per vertex.
    pub fn angle_arcs(&self, mark_radius: f64) -> [ArcPath; 3] {
        std::array::from_fn(|i| {
            let v = self.vertices[i];
            let a = self.vertices[(i + 1) % 3];
            let b = self.vertices[(i + 2) % 3];
            arc_path(v, mark_radius, direction_deg(a - v), direction_deg(b - v))
        })
    }

    /// Midpoints of the three sides, in label order
    pub fn side_midpoints(&self) -> [DVec2; 3] {
        std::array::from_fn(|i| (self.vertices[i] + self.vertices[(i + 1) % 3]) / 2.0)
    }
}

/// Math-convention angle of a y-down pixel direction
fn direction_deg(d: DVec2) -> f64 {
    (-d.y).atan2(d.x).to_degrees()
}

// ==================== Number line ====================

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLinePoint {
    pub value: f64,
    pub label: Option<String>,
    /// Hollow marker (value excluded)
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
    pub start_closed: bool,
    pub end_closed: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberLineDiagram {
    pub range: Range,
    /// Tick spacing; picked automatically when absent
    pub tick_step: Option<f64>,
    pub points: Vec<NumberLinePoint>,
    pub intervals: Vec<Interval>,
}

impl StepPlan for NumberLineDiagram {
    fn steps(&self) -> Vec<StepId> {
        plan(
            &[step::LINE, step::TICKS],
            [
                (!self.points.is_empty(), step::POINTS),
                (!self.intervals.is_empty(), step::INTERVALS),
            ],
        )
    }
}

impl NumberLineDiagram {
    pub fn axis(&self, viewport: Viewport) -> Axis {
        let p = viewport.padding;
        Axis::new(self.range, viewport.width, p.left, p.right)
    }

    /// `(value, pixel x)` for every tick
    pub fn ticks(&self, viewport: Viewport) -> Vec<(f64, f64)> {
        let step = match self.tick_step {
            Some(s) if s.is_finite() && s > 0.0 => s,
            _ => self.range.nice_step(10),
        };
        self.axis(viewport).tick_pixels(step)
    }
}

// ==================== Unit circle ====================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitCircleDiagram {
    pub angles: Vec<Angle>,
    /// Show `(cos θ, sin θ)` for each angle
    pub coordinates: bool,
}

impl StepPlan for UnitCircleDiagram {
    fn steps(&self) -> Vec<StepId> {
        plan(
            &[step::CIRCLE, step::AXES],
            [
                (!self.angles.is_empty(), step::ANGLES),
                (self.coordinates, step::COORDINATES),
            ],
        )
    }
}

impl UnitCircleDiagram {
    /// Arcs from 0° to each angle, counter-clockwise, reflex angles included.
    pub fn angle_arcs(&self, center: DVec2, mark_radius: f64) -> Vec<ArcPath> {
        self.angles
            .iter()
            .map(|a| {
                let deg = a.normalized().raw();
                arc_path_explicit(center, mark_radius, 0.0, deg, deg > 180.0, false)
            })
            .collect()
    }

    /// `(cos θ, sin θ)` for each angle
    pub fn coordinates_of(&self) -> Vec<DVec2> {
        self.angles
            .iter()
            .map(|a| {
                let rad = a.to_radians();
                dvec2(rad.cos(), rad.sin())
            })
            .collect()
    }
}
