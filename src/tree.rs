use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::{debug, trace};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Leaf {
        byte: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(byte: u8, weight: u64) -> Self {
        Node::Leaf { byte, weight }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn byte(&self) -> Option<u8> {
        match self {
            Node::Leaf { byte, .. } => Some(*byte),
            Node::Internal { .. } => None,
        }
    }

    fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }
}

/// Hooks a [`PriorityTree`] calls while merging and walking nodes.
pub trait TreeStrategy {
    /// Combines the two lowest-weight nodes into a new internal node.
    fn create_internal_node(&mut self, left: Node, right: Node) -> Node;

    fn on_visit(&mut self, _node: &Node) {}
}

/// Queue entry. Ordering looks only at the key, never at the node.
struct HeapNode {
    key: Reverse<(u64, u64)>,
    node: Node,
}

impl HeapNode {
    fn new(node: Node, seq: u64) -> Self {
        HeapNode {
            key: Reverse((node.weight(), seq)),
            node,
        }
    }
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for HeapNode {}

#[derive(Debug, Eq, PartialEq)]
pub struct PriorityTree {
    root: Node,
}

impl PriorityTree {
    /// Merges the two lightest nodes until a single root remains.
    ///
    /// Nodes of equal weight leave the queue in the order they entered it.
    /// Returns `None` when no leaves are given; a single leaf becomes the root.
    pub fn build<S, I>(leaves: I, strategy: &mut S) -> Option<Self>
    where
        S: TreeStrategy,
        I: IntoIterator<Item = Node>,
    {
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        for leaf in leaves {
            heap.push(HeapNode::new(leaf, seq));
            seq += 1;
        }
        debug!("Initial queue size: {}", heap.len());

        loop {
            let first = heap.pop()?;
            let Some(second) = heap.pop() else {
                debug!("Tree construction complete, root weight {}", first.node.weight());
                return Some(PriorityTree { root: first.node });
            };

            let merged = strategy.create_internal_node(first.node, second.node);
            trace!("Merged nodes into weight {}", merged.weight());
            heap.push(HeapNode::new(merged, seq));
            seq += 1;
        }
    }

    pub fn from_root(root: Node) -> Self {
        PriorityTree { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// Visits every node, parents before children, left before right.
    pub fn traverse_preorder<S: TreeStrategy>(&self, strategy: &mut S) {
        let mut stack = vec![&self.root];

        while let Some(node) = stack.pop() {
            strategy.on_visit(node);
            if let Some((left, right)) = node.children() {
                stack.push(right);
                stack.push(left);
            }
        }
    }

    /// Visits every node, left subtree first, then the node, then the right subtree.
    pub fn traverse_inorder<S: TreeStrategy>(&self, strategy: &mut S) {
        let mut stack: Vec<&Node> = Vec::new();
        let mut current = Some(&self.root);

        while current.is_some() || !stack.is_empty() {
            if let Some(node) = current {
                stack.push(node);
                current = node.children().map(|(left, _)| left);
            } else if let Some(node) = stack.pop() {
                strategy.on_visit(node);
                current = node.children().map(|(_, right)| right);
            }
        }
    }
}

#[cfg(test)]
mod tests;
