//! Data-driven sampler tests.
//!
//! Each `tests/curves/*.curve` file is a list of `key: value` lines:
//!
//! ```text
//! expression: 1/x
//! domain: -1, 1
//! y_range: -10, 10
//! resolution: 200      (optional, default 200)
//! segments: 2
//! points: 5            (optional, total points over all segments)
//! ```
//!
//! Lines starting with `#` are comments.

use std::collections::HashMap;

use camino::Utf8Path;
use figura::geometry::{PlotMapper, defaults, sample};
use figura::{Padding, Range, Viewport};

struct Fixture {
    expression: String,
    domain: Range,
    y_range: Range,
    resolution: usize,
    segments: usize,
    points: Option<usize>,
}

fn parse_range(value: &str) -> Result<Range, String> {
    let (min, max) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `min, max`, got {:?}", value))?;
    let min: f64 = min.trim().parse().map_err(|e| format!("{}: {:?}", e, min))?;
    let max: f64 = max.trim().parse().map_err(|e| format!("{}: {:?}", e, max))?;
    Ok(Range::new(min, max))
}

fn parse_fixture(text: &str) -> Result<Fixture, String> {
    let mut fields = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| format!("expected `key: value`, got {:?}", line))?;
        fields.insert(key.trim().to_string(), value.trim().to_string());
    }
    let field = |key: &str| {
        fields
            .get(key)
            .cloned()
            .ok_or_else(|| format!("missing `{}`", key))
    };
    let count = |value: String| value.parse::<usize>().map_err(|e| e.to_string());

    Ok(Fixture {
        expression: field("expression")?,
        domain: parse_range(&field("domain")?)?,
        y_range: parse_range(&field("y_range")?)?,
        resolution: match fields.get("resolution") {
            Some(r) => count(r.clone())?,
            None => defaults::SAMPLE_RESOLUTION,
        },
        segments: count(field("segments")?)?,
        points: fields.get("points").cloned().map(count).transpose()?,
    })
}

fn test_curve_file(path: &Utf8Path) -> datatest_stable::Result<()> {
    let text = std::fs::read_to_string(path)?;
    let fixture = parse_fixture(&text).map_err(|e| format!("{}: {}", path, e))?;

    let viewport = Viewport::new(400.0, 300.0, Padding::uniform(20.0));
    let mapper = PlotMapper::new(fixture.domain, fixture.y_range, viewport);
    let segments = sample(&fixture.expression, fixture.domain, fixture.resolution, &mapper);

    let lengths: Vec<usize> = segments.iter().map(|s| s.len()).collect();
    if segments.len() != fixture.segments {
        return Err(format!(
            "{}: expected {} segments for {:?}, got {} (lengths {:?})",
            path,
            fixture.segments,
            fixture.expression,
            segments.len(),
            lengths
        )
        .into());
    }
    if let Some(expected) = fixture.points {
        let total: usize = lengths.iter().sum();
        if total != expected {
            return Err(format!("{}: expected {} points, got {}", path, expected, total).into());
        }
    }
    for seg in &segments {
        if seg.points.iter().any(|p| !p.is_finite()) {
            return Err(format!("{}: non-finite point in {:?}", path, seg).into());
        }
    }
    Ok(())
}

datatest_stable::harness! {
    { test = test_curve_file, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/curves"), pattern = r"\.curve$" },
}
