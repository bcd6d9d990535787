use std::iter::FusedIterator;

use crate::node::{NodeArena, NodeId};

/// In-order iterator over the values of an [`crate::tree::AaTree`].
///
/// Keeps the path of not-yet-visited ancestors on a stack, so each step is amortized O(1)
/// and the whole walk is O(n) without touching parent links.
pub struct Iter<'a, V> {
    nodes: &'a NodeArena<V>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(nodes: &'a NodeArena<V>, root: Option<NodeId>, len: usize) -> Self {
        let mut iter = Self {
            nodes,
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut cur: Option<NodeId>) {
        while let Some(id) = cur {
            self.stack.push(id);
            cur = self.nodes.left(id);
        }
    }

    pub(crate) fn next_id(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.nodes.right(id));
        self.remaining = self.remaining.saturating_sub(1);
        Some(id)
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        self.next_id().map(|id| &nodes.node(id).value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}
