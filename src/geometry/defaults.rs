//! Default sizes and tuning constants (pixels unless noted)

/// Below this width a range or span is treated as degenerate.
pub const EPSILON: f64 = 1e-9;

/// Equal steps across the sampled domain; 201 samples keeps curves smooth
/// without bloating path data.
pub const SAMPLE_RESOLUTION: usize = 200;

/// Samples further than this multiple of the visible y span outside the visible
/// range are treated as breaks instead of drawn as asymptote spikes.
pub const OUT_OF_RANGE_SLACK: f64 = 1.5;

/// The variable expressions are written in.
pub const VARIABLE: &str = "x";

/// Vertical displacement applied to every other colliding label.
pub const STAGGER_OFFSET: f64 = 14.0;

/// Vertical distance between tree levels.
pub const LEVEL_HEIGHT: f64 = 60.0;

pub const VIEWPORT_WIDTH: f64 = 400.0;
pub const VIEWPORT_HEIGHT: f64 = 400.0;
pub const VIEWPORT_PADDING: f64 = 30.0;

/// Significant figures written for path coordinates.
pub const PATH_PRECISION: i32 = 6;

/// Estimated advance of one label character.
pub const LABEL_CHAR_WIDTH: f64 = 7.0;

/// Height of a one-line label box.
pub const LABEL_HEIGHT: f64 = 14.0;

/// Gap between a point and its label.
pub const LABEL_GAP: f64 = 10.0;

/// Radius of angle marks inside shapes.
pub const ANGLE_MARK_RADIUS: f64 = 18.0;
