//! Function sampling
//!
//! Turns `y = f(x)` into pixel-space polylines. The domain is walked in equal
//! steps; every sample that cannot be drawn (evaluation error, non-finite value,
//! or a value far outside the visible y range) closes the current segment, so
//! asymptotes and holes never get bridged by a straight line.

use glam::dvec2;

use crate::types::{Range, SamplePoint};

use super::defaults;
use super::eval::Evaluator;
use super::mapper::PlotMapper;
use super::path_builder::{PathSegment, SegmentBuilder};

/// Tuning for the sampler
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerConfig {
    /// Number of equal steps across the domain (`resolution + 1` samples)
    pub resolution: usize,

    /// How far beyond the visible y range a sample may land, in multiples of
    /// the range's span, before it counts as a break
    pub slack: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            resolution: defaults::SAMPLE_RESOLUTION,
            slack: defaults::OUT_OF_RANGE_SLACK,
        }
    }
}

impl SamplerConfig {
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_slack(mut self, slack: f64) -> Self {
        self.slack = slack;
        self
    }

    /// Visible y range grown by the slack on both sides
    fn y_bounds(&self, visible: Range) -> (f64, f64) {
        let visible = visible.normalized();
        let slack = if self.slack.is_finite() && self.slack >= 0.0 {
            self.slack
        } else {
            defaults::OUT_OF_RANGE_SLACK
        };
        let margin = slack * visible.span();
        (visible.min - margin, visible.max + margin)
    }
}

/// Samples curves onto one plot.
#[derive(Clone, Copy, Debug)]
pub struct Sampler {
    mapper: PlotMapper,
    config: SamplerConfig,
}

impl Sampler {
    pub fn new(mapper: PlotMapper) -> Self {
        Self {
            mapper,
            config: SamplerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SamplerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> SamplerConfig {
        self.config
    }

    /// Compile `expression` in `x` and sample it. An expression that does not
    /// parse yields no segments.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn sample_expression(&self, expression: &str, domain: Range) -> Vec<PathSegment> {
        match crate::compile(expression) {
            Ok(compiled) => self.sample(&compiled, domain),
            Err(err) => {
                crate::log::warn!(expression, error = %err, "expression does not parse, nothing to plot");
                Vec::new()
            }
        }
    }

    /// Sample an evaluator across `domain`.
    pub fn sample<E: Evaluator + ?Sized>(&self, evaluator: &E, domain: Range) -> Vec<PathSegment> {
        let domain = domain.normalized();
        let steps = self.config.resolution.max(1);
        let (lo, hi) = self.config.y_bounds(self.mapper.y_range());

        let mut builder = SegmentBuilder::new();
        for i in 0..=steps {
            // The last sample lands exactly on the domain's end
            let x = if i == steps {
                domain.max
            } else {
                domain.min + domain.span() * (i as f64 / steps as f64)
            };
            match evaluator.evaluate(x) {
                Ok(y) if y.is_finite() && y >= lo && y <= hi => {
                    builder.push(x, self.mapper.to_pixel(dvec2(x, y)));
                }
                _ => builder.mark_break(),
            }
        }
        self.finish(builder, steps + 1)
    }

    /// Turn explicit data into segments with the same break rules as
    /// [`Sampler::sample`].
    pub fn sample_points(&self, points: &[SamplePoint]) -> Vec<PathSegment> {
        let (lo, hi) = self.config.y_bounds(self.mapper.y_range());
        let mut builder = SegmentBuilder::new();
        for point in points {
            match point.y {
                Some(y) if y.is_finite() && y >= lo && y <= hi => {
                    builder.push(point.x, self.mapper.to_pixel(dvec2(point.x, y)));
                }
                _ => builder.mark_break(),
            }
        }
        self.finish(builder, points.len())
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn finish(&self, builder: SegmentBuilder, samples: usize) -> Vec<PathSegment> {
        let breaks = builder.rejected();
        let segments = builder.build();
        crate::log::debug!(
            samples,
            breaks,
            segments = segments.len(),
            "sampled curve"
        );
        segments
    }
}

/// Sample `expression` over `domain` with `resolution` steps.
///
/// A resolution of 0 is treated as 1. The default out-of-range slack applies.
pub fn sample(
    expression: &str,
    domain: Range,
    resolution: usize,
    mapper: &PlotMapper,
) -> Vec<PathSegment> {
    Sampler::new(*mapper)
        .with_config(SamplerConfig::default().with_resolution(resolution))
        .sample_expression(expression, domain)
}

/// Sample any [`Evaluator`] with explicit configuration.
pub fn sample_with<E: Evaluator + ?Sized>(
    evaluator: &E,
    domain: Range,
    mapper: &PlotMapper,
    config: SamplerConfig,
) -> Vec<PathSegment> {
    Sampler::new(*mapper).with_config(config).sample(evaluator, domain)
}

/// Segments for explicit data; `y == None` breaks the run.
pub fn sample_points(
    points: &[SamplePoint],
    mapper: &PlotMapper,
    config: SamplerConfig,
) -> Vec<PathSegment> {
    Sampler::new(*mapper).with_config(config).sample_points(points)
}
