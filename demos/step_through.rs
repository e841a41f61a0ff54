use figura::diagram::TreeDiagram;
use figura::geometry::TreeNode;
use figura::{Diagram, RenderConfig, StepController};

fn coin(prefix: &str, depth: usize) -> TreeNode {
    let label: String = prefix.chars().last().map(String::from).unwrap_or_default();
    let mut node = TreeNode::new(prefix).with_label(label);
    if depth > 0 {
        for side in ["H", "T"] {
            node = node.with_child(coin(&format!("{}{}", prefix, side), depth - 1));
        }
    }
    node
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let tree = TreeDiagram {
        root: TreeNode::new("start").with_children([coin("H", 1), coin("T", 1)]),
        highlight_path: Some(vec!["start".into(), "H".into(), "HT".into()]),
    };
    let config = RenderConfig::default();
    let placed = tree.layout(&config);
    let diagram = Diagram::from(tree);
    let mut steps = StepController::for_diagram(&diagram);

    loop {
        println!("{}", steps.indicator().label(config.locale.as_ref()));
        for step in steps.steps() {
            let marker = if steps.is_current(step.as_str()) {
                ">"
            } else if steps.is_visible(step.as_str()) {
                "+"
            } else {
                " "
            };
            println!("  {} {}", marker, step);
        }
        if !steps.next() {
            break;
        }
    }

    println!();
    for (id, pos) in placed.iter() {
        println!("{:>6} level {} at ({:.1}, {:.1})", id, pos.level, pos.x, pos.y);
    }
}
