//! Label collision detection
//!
//! Boxes are axis-aligned with `(x, y)` at the top-left corner in pixel space.
//! Overlap uses open intervals: boxes that only share an edge do not collide.

use glam::DVec2;

/// A label's bounding box
#[derive(Clone, Debug, PartialEq)]
pub struct LabelBox {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LabelBox {
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Box of `size` centered on `anchor`
    pub fn centered(id: impl Into<String>, anchor: DVec2, size: DVec2) -> Self {
        Self::new(
            id,
            anchor.x - size.x / 2.0,
            anchor.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap on both axes
    pub fn intersects(&self, other: &LabelBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }
}

/// Every overlapping pair, once, as `(earlier id, later id)` in input order.
pub fn detect_collisions(boxes: &[LabelBox]) -> Vec<(String, String)> {
    colliding_pairs(boxes)
        .into_iter()
        .map(|(i, j)| (boxes[i].id.clone(), boxes[j].id.clone()))
        .collect()
}

fn colliding_pairs(boxes: &[LabelBox]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in boxes.iter().enumerate() {
        for (j, b) in boxes.iter().enumerate().skip(i + 1) {
            if a.intersects(b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Push every other colliding label down by `offset`.
///
/// Labels that take part in a collision are visited in x order and
/// alternately left alone and moved. Output keeps input order. Dense or
/// irregular layouts can still overlap afterwards.
pub fn stagger(boxes: &[LabelBox], offset: f64) -> Vec<LabelBox> {
    let mut involved = vec![false; boxes.len()];
    for (i, j) in colliding_pairs(boxes) {
        involved[i] = true;
        involved[j] = true;
    }

    let mut order: Vec<usize> = (0..boxes.len()).filter(|&i| involved[i]).collect();
    order.sort_by(|&a, &b| boxes[a].x.total_cmp(&boxes[b].x));

    let mut out = boxes.to_vec();
    for &i in order.iter().skip(1).step_by(2) {
        out[i] = boxes[i].translated(0.0, offset);
    }
    crate::log::debug!(
        labels = boxes.len(),
        moved = order.len() / 2,
        "staggered colliding labels"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::defaults::STAGGER_OFFSET;
    use glam::dvec2;

    fn label(id: &str, x: f64, y: f64) -> LabelBox {
        LabelBox::new(id, x, y, 20.0, 10.0)
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = label("a", 0.0, 0.0);
        assert!(!a.intersects(&label("b", 20.0, 0.0)));
        assert!(!a.intersects(&label("b", 0.0, 10.0)));
        assert!(a.intersects(&label("b", 19.9, 9.9)));
    }

    #[test]
    fn pairs_reported_once_in_input_order() {
        let boxes = vec![label("a", 0.0, 0.0), label("b", 10.0, 0.0), label("c", 100.0, 0.0)];
        assert_eq!(
            detect_collisions(&boxes),
            vec![("a".to_string(), "b".to_string())]
        );
    }

    #[test]
    fn detection_is_symmetric() {
        let a = label("a", 0.0, 0.0);
        let b = label("b", 5.0, 5.0);
        let forward = detect_collisions(&[a.clone(), b.clone()]);
        let backward = detect_collisions(&[b, a]);
        assert_eq!(forward, vec![("a".to_string(), "b".to_string())]);
        assert_eq!(backward, vec![("b".to_string(), "a".to_string())]);
    }

    #[test]
    fn centered_box() {
        let b = LabelBox::centered("p", dvec2(50.0, 50.0), dvec2(20.0, 10.0));
        assert_eq!((b.x, b.y, b.right(), b.bottom()), (40.0, 45.0, 60.0, 55.0));
        assert_eq!(b.center(), dvec2(50.0, 50.0));
    }

    #[test]
    fn stagger_moves_every_other_colliding_label() {
        // given out of x order on purpose
        let boxes = vec![
            label("c", 30.0, 0.0),
            label("a", 0.0, 0.0),
            label("far", 200.0, 0.0),
            label("b", 15.0, 0.0),
        ];
        let out = stagger(&boxes, STAGGER_OFFSET);
        let ys: Vec<(&str, f64)> = out.iter().map(|b| (b.id.as_str(), b.y)).collect();
        assert_eq!(
            ys,
            vec![("c", 0.0), ("a", 0.0), ("far", 0.0), ("b", STAGGER_OFFSET)]
        );
    }

    #[test]
    fn stagger_without_collisions_is_identity() {
        let boxes = vec![label("a", 0.0, 0.0), label("b", 50.0, 0.0)];
        assert_eq!(stagger(&boxes, 12.0), boxes);
    }

    #[test]
    fn stagger_resolves_a_simple_row() {
        let boxes = vec![label("a", 0.0, 0.0), label("b", 15.0, 0.0)];
        let out = stagger(&boxes, 12.0);
        assert!(detect_collisions(&out).is_empty());
    }
}
