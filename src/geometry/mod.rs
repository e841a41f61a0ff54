//! Pixel-space geometry for diagrams
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `mapper`: Data ↔ pixel coordinate mapping
//! - `eval`: Expression evaluation and the `Evaluator` seam
//! - `sampler`: Function sampling into broken polylines
//! - `path_builder`: Segment accumulation for sampled curves
//! - `arc`: Angle arcs under the short-arc policy
//! - `tree`: Proportional tree layout
//! - `collision`: Label overlap detection and staggering
//! - `svg`: Path data serialization

pub mod arc;
pub mod collision;
pub mod defaults;
pub mod eval;
pub mod mapper;
pub mod path_builder;
pub mod sampler;
pub mod svg;
pub mod tree;

// Re-export commonly used items
pub use arc::{ArcPath, arc_path, arc_path_explicit, point_on_circle};
pub use collision::{LabelBox, detect_collisions, stagger};
pub use eval::{CompiledExpr, Evaluator};
pub use mapper::{Axis, PlotMapper, to_data, to_pixel};
pub use path_builder::{PathSegment, SegmentBuilder, segments_to_path_data};
pub use sampler::{Sampler, SamplerConfig, sample, sample_points, sample_with};
pub use svg::PathData;
pub use tree::{NodePosition, TreeLayout, TreeLayoutConfig, TreeNode, layout, layout_with};
