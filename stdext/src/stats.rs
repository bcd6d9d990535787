//! Statistics and introspection for AA-trees.
//!
//! Useful for checking how well balanced a tree is after a workload, and for
//! spotting level distributions that drift from what the invariants predict.

use std::collections::BTreeMap;

use crate::tree::{AaTree, NodeRef};

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub num_nodes: usize,
    pub num_leaves: usize,
    /// Edges on the longest root-to-leaf path, plus one. Zero for an empty tree.
    pub max_height: usize,
    pub max_level: u32,
    /// Right links joining two nodes of the same level.
    pub horizontal_links: usize,
    pub nodes_per_level: BTreeMap<u32, usize>,
}

impl<V, K: ?Sized> TreeStatsTrait for AaTree<V, K> {
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack: Vec<(NodeRef<'_, V>, usize)> = Vec::new();
        if let Some(root) = self.root() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            update_tree_stats(&mut stats, &node, depth);
            if let Some(l) = node.left() {
                stack.push((l, depth + 1));
            }
            if let Some(r) = node.right() {
                stack.push((r, depth + 1));
            }
        }
        stats
    }
}

fn update_tree_stats<V>(stats: &mut TreeStats, node: &NodeRef<'_, V>, depth: usize) {
    let level = node.level();
    stats.num_nodes += 1;
    if node.is_leaf() {
        stats.num_leaves += 1;
    }
    stats.max_height = stats.max_height.max(depth);
    stats.max_level = stats.max_level.max(level);
    if node.right().is_some_and(|r| r.level() == level) {
        stats.horizontal_links += 1;
    }
    *stats.nodes_per_level.entry(level).or_default() += 1;
}
