use super::{Node, PriorityTree, TreeStrategy};

#[derive(Default)]
struct Recorder {
    merges: usize,
    visited: Vec<String>,
}

impl TreeStrategy for Recorder {
    fn create_internal_node(&mut self, left: Node, right: Node) -> Node {
        self.merges += 1;
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn on_visit(&mut self, node: &Node) {
        let label = match node.byte() {
            Some(byte) => (byte as char).to_string(),
            None => node.weight().to_string(),
        };
        self.visited.push(label);
    }
}

fn sample_leaves() -> Vec<Node> {
    vec![
        Node::leaf(b'A', 5),
        Node::leaf(b'B', 2),
        Node::leaf(b'C', 1),
        Node::leaf(b'D', 1),
    ]
}

#[test]
fn test_build_merges_lightest_first() {
    let mut recorder = Recorder::default();
    let tree = PriorityTree::build(sample_leaves(), &mut recorder).unwrap();

    assert_eq!(recorder.merges, 3);
    assert_eq!(tree.root().weight(), 9);
    assert!(!tree.root().is_leaf());
}

#[test]
fn test_preorder_visits_parents_first() {
    let mut recorder = Recorder::default();
    let tree = PriorityTree::build(sample_leaves(), &mut recorder).unwrap();

    recorder.visited.clear();
    tree.traverse_preorder(&mut recorder);
    assert_eq!(recorder.visited, vec!["9", "4", "B", "2", "C", "D", "A"]);
}

#[test]
fn test_inorder_visits_left_subtree_first() {
    let mut recorder = Recorder::default();
    let tree = PriorityTree::build(sample_leaves(), &mut recorder).unwrap();

    tree.traverse_inorder(&mut recorder);
    assert_eq!(recorder.visited, vec!["B", "4", "C", "2", "D", "9", "A"]);
}

#[test]
fn test_single_leaf_becomes_root() {
    let mut recorder = Recorder::default();
    let tree = PriorityTree::build(vec![Node::leaf(b'x', 1000)], &mut recorder).unwrap();

    assert_eq!(recorder.merges, 0);
    assert_eq!(tree.root(), &Node::leaf(b'x', 1000));

    tree.traverse_preorder(&mut recorder);
    tree.traverse_inorder(&mut recorder);
    assert_eq!(recorder.visited, vec!["x", "x"]);
}

#[test]
fn test_empty_input_has_no_tree() {
    let mut recorder = Recorder::default();
    assert!(PriorityTree::build(Vec::new(), &mut recorder).is_none());
}

#[test]
fn test_equal_weights_leave_in_insertion_order() {
    let mut recorder = Recorder::default();
    let leaves = vec![Node::leaf(b'p', 1), Node::leaf(b'q', 1)];
    let tree = PriorityTree::build(leaves, &mut recorder).unwrap();

    match tree.into_root() {
        Node::Internal { left, right, .. } => {
            assert_eq!(left.byte(), Some(b'p'));
            assert_eq!(right.byte(), Some(b'q'));
        }
        Node::Leaf { .. } => panic!("expected an internal root"),
    }
}
