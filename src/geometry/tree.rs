//! Proportional tree layout
//!
//! Each node owns a horizontal span. Its children split that span left to
//! right in proportion to their weights, with no gaps, and the node sits at
//! the middle of its span. A leaf weighs 1 unless it carries a positive
//! finite weight; an internal node weighs the sum of its children. Depth sets
//! the vertical position.

use std::collections::BTreeMap;

use glam::{DVec2, dvec2};

use super::defaults;

/// Input tree node. Children are owned, so the input is always acyclic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeNode {
    pub id: String,
    pub label: Option<String>,
    pub children: Vec<TreeNode>,
    /// Explicit leaf weight; ignored on internal nodes
    pub weight: Option<f64>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The weight this node would have as a leaf
    pub fn leaf_weight(&self) -> f64 {
        match self.weight {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => 1.0,
        }
    }

    /// Leaf weight, or the sum over the children
    pub fn weight(&self) -> f64 {
        if self.is_leaf() {
            self.leaf_weight()
        } else {
            self.children.iter().map(TreeNode::weight).sum()
        }
    }
}

/// Where a node landed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
    pub level: usize,
    pub span_start: f64,
    pub span_width: f64,
}

impl NodePosition {
    pub fn span_end(&self) -> f64 {
        self.span_start + self.span_width
    }

    pub fn point(&self) -> DVec2 {
        dvec2(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeLayoutConfig {
    /// Vertical distance between levels
    pub level_height: f64,
    /// y of the root level
    pub top: f64,
    /// x where the root span begins
    pub left: f64,
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self {
            level_height: defaults::LEVEL_HEIGHT,
            top: 0.0,
            left: 0.0,
        }
    }
}

/// Result of a layout: positions by id plus parent→child edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeLayout {
    positions: BTreeMap<String, NodePosition>,
    edges: Vec<(String, String)>,
}

impl TreeLayout {
    pub fn get(&self, id: &str) -> Option<&NodePosition> {
        self.positions.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodePosition)> {
        self.positions.iter().map(|(id, pos)| (id.as_str(), pos))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `(parent, child)` id pairs in pre-order
    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    /// Deepest level reached (the root is level 0)
    pub fn depth(&self) -> usize {
        self.positions.values().map(|p| p.level).max().unwrap_or(0)
    }

    pub fn positions(&self) -> &BTreeMap<String, NodePosition> {
        &self.positions
    }
}

/// Lay out `root` across `available_width` pixels.
pub fn layout(root: &TreeNode, available_width: f64, level_height: f64) -> TreeLayout {
    let config = TreeLayoutConfig {
        level_height,
        ..Default::default()
    };
    layout_with(root, available_width, &config)
}

/// Lay out `root` with explicit offsets.
pub fn layout_with(root: &TreeNode, available_width: f64, config: &TreeLayoutConfig) -> TreeLayout {
    let weighed = Weighed::new(root);
    let mut out = TreeLayout::default();
    place(&weighed, config.left, available_width, 0, config, &mut out);
    out
}

/// Input tree annotated with subtree weights, so each weight is computed once.
struct Weighed<'a> {
    node: &'a TreeNode,
    weight: f64,
    children: Vec<Weighed<'a>>,
}

impl<'a> Weighed<'a> {
    fn new(node: &'a TreeNode) -> Self {
        let children: Vec<Weighed<'a>> = node.children.iter().map(Weighed::new).collect();
        let weight = if children.is_empty() {
            node.leaf_weight()
        } else {
            children.iter().map(|c| c.weight).sum()
        };
        Weighed {
            node,
            weight,
            children,
        }
    }
}

fn place(
    w: &Weighed<'_>,
    span_start: f64,
    span_width: f64,
    level: usize,
    config: &TreeLayoutConfig,
    out: &mut TreeLayout,
) {
    let pos = NodePosition {
        x: span_start + span_width / 2.0,
        y: config.top + level as f64 * config.level_height,
        level,
        span_start,
        span_width,
    };
    if out.positions.insert(w.node.id.clone(), pos).is_some() {
        crate::log::warn!(id = %w.node.id, "duplicate tree node id, later node wins");
    }

    let total: f64 = w.children.iter().map(|c| c.weight).sum();
    let span_end = span_start + span_width;
    let mut cursor = span_start;
    let last = w.children.len().saturating_sub(1);
    for (i, child) in w.children.iter().enumerate() {
        out.edges.push((w.node.id.clone(), child.node.id.clone()));
        // The last child takes the remainder so the partition is exact
        let width = if i == last {
            span_end - cursor
        } else if total > 0.0 {
            span_width * child.weight / total
        } else {
            span_width / w.children.len() as f64
        };
        place(child, cursor, width, level + 1, config, out);
        cursor += width;
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

    fn leaf(id: &str) -> TreeNode {
        TreeNode::new(id)
    }

    #[test]
    fn weighted_children_split_the_root() {
        let root = TreeNode::new("root")
            .with_child(leaf("a").with_weight(1.0))
            .with_child(leaf("b").with_weight(3.0));
        assert_close(root.weight(), 4.0);

        let l = layout(&root, 120.0, 50.0);
        let a = l.get("a").unwrap();
        let b = l.get("b").unwrap();
        assert_close(a.span_start, 0.0);
        assert_close(a.span_end(), 30.0);
        assert_close(b.span_start, 30.0);
        assert_close(b.span_end(), 120.0);
        assert_close(l.get("root").unwrap().x, 60.0);
        assert_close(a.x, 15.0);
        assert_close(b.x, 75.0);
        assert_close(b.y, 50.0);
    }

    #[test]
    fn single_child_chain_keeps_full_width() {
        let root = TreeNode::new("r").with_child(TreeNode::new("m").with_child(leaf("l")));
        let l = layout(&root, 90.0, 40.0);
        for id in ["r", "m", "l"] {
            let p = l.get(id).unwrap();
            assert_close(p.span_width, 90.0);
            assert_close(p.x, 45.0);
        }
        assert_close(l.get("l").unwrap().y, 80.0);
        assert_eq!(l.depth(), 2);
    }

    #[test]
    fn invalid_weights_fall_back_to_one() {
        assert_eq!(leaf("a").with_weight(0.0).leaf_weight(), 1.0);
        assert_eq!(leaf("a").with_weight(-2.0).leaf_weight(), 1.0);
        assert_eq!(leaf("a").with_weight(f64::NAN).leaf_weight(), 1.0);
        assert_eq!(leaf("a").with_weight(f64::INFINITY).leaf_weight(), 1.0);
        assert_eq!(leaf("a").with_weight(2.5).leaf_weight(), 2.5);
    }

    #[test]
    fn internal_weight_ignores_explicit_weight() {
        let node = TreeNode::new("n")
            .with_weight(10.0)
            .with_children([leaf("a"), leaf("b")]);
        assert_eq!(node.weight(), 2.0);
    }

    #[test]
    fn deeper_subtrees_get_more_room() {
        // left subtree has three leaves, right has one
        let root = TreeNode::new("root")
            .with_child(TreeNode::new("l").with_children([leaf("l1"), leaf("l2"), leaf("l3")]))
            .with_child(leaf("r"));
        let l = layout(&root, 400.0, 60.0);
        assert_close(l.get("l").unwrap().span_width, 300.0);
        assert_close(l.get("r").unwrap().span_width, 100.0);
        assert_close(l.get("l2").unwrap().x, 150.0);
    }

    #[test]
    fn config_offsets_shift_everything() {
        let root = TreeNode::new("root").with_children([leaf("a"), leaf("b")]);
        let config = TreeLayoutConfig {
            level_height: 30.0,
            top: 20.0,
            left: 10.0,
        };
        let l = layout_with(&root, 100.0, &config);
        let root_pos = l.get("root").unwrap();
        assert_close(root_pos.x, 60.0);
        assert_close(root_pos.y, 20.0);
        assert_close(l.get("a").unwrap().span_start, 10.0);
        assert_close(l.get("b").unwrap().y, 50.0);
    }

    #[test]
    fn edges_are_pre_order() {
        let root = TreeNode::new("r")
            .with_child(TreeNode::new("a").with_child(leaf("a1")))
            .with_child(leaf("b"));
        let l = layout(&root, 100.0, 10.0);
        let edges: Vec<(&str, &str)> = l
            .edges()
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        assert_eq!(edges, vec![("r", "a"), ("a", "a1"), ("r", "b")]);
    }

    #[test]
    fn duplicate_ids_keep_the_later_node() {
        let root = TreeNode::new("r").with_children([leaf("x"), leaf("x")]);
        let l = layout(&root, 100.0, 10.0);
        assert_eq!(l.len(), 2);
        assert_close(l.get("x").unwrap().span_start, 50.0);
    }

    #[test]
    fn children_partition_parent_exactly() {
        let root = TreeNode::new("r").with_children([
            leaf("a").with_weight(0.3),
            leaf("b").with_weight(0.3),
            leaf("c").with_weight(0.4),
        ]);
        let l = layout(&root, 333.3, 10.0);
        let sum: f64 = ["a", "b", "c"]
            .iter()
            .map(|id| l.get(id).unwrap().span_width)
            .sum();
        assert_close(sum, 333.3);
        assert_close(l.get("c").unwrap().span_end(), 333.3);
    }
}
