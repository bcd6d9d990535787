//! AA-tree nodes and the local rebalancing primitives.
//!
//! Nodes live in a [`FillVector`] arena and refer to each other by [`NodeId`]. Child links
//! are the owning edges of the tree; the parent link is a plain index kept in sync by
//! [`NodeArena::set_left`] / [`NodeArena::set_right`] and is only read for
//! predecessor/successor walks.

use crate::utils::fillvector::{FVIndex, FillVector};

pub type NodeId = FVIndex;

pub(crate) struct Node<V> {
    pub(crate) value: V,
    pub(crate) level: u32,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<V> Node<V> {
    #[inline]
    pub(crate) fn new_leaf(value: V) -> Self {
        Self {
            value,
            level: 1,
            left: None,
            right: None,
            parent: None,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

pub(crate) struct NodeArena<V> {
    nodes: FillVector<Node<V>>,
}

impl<V> NodeArena<V> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: FillVector::with_capacity(16),
        }
    }

    #[inline]
    pub(crate) fn alloc(&mut self, value: V) -> NodeId {
        self.nodes.add(|_| Node::new_leaf(value))
    }

    /// Unlink nothing, just release the slot. Callers detach the node from its parent first.
    #[inline]
    pub(crate) fn release(&mut self, id: NodeId) -> Option<V> {
        self.nodes.take(id).map(|n| n.value)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.size()
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<V> {
        &self.nodes[id]
    }

    #[cfg(test)]
    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
        &mut self.nodes[id]
    }

    /// Level of an optional link; an absent child counts as level 0.
    #[inline]
    pub(crate) fn level(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self.nodes[id].level)
    }

    #[inline]
    pub(crate) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].left
    }

    #[inline]
    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].right
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    #[inline]
    pub(crate) fn set_left(&mut self, id: NodeId, child: Option<NodeId>) {
        self.nodes[id].left = child;
        if let Some(c) = child {
            self.nodes[c].parent = Some(id);
        }
    }

    #[inline]
    pub(crate) fn set_right(&mut self, id: NodeId, child: Option<NodeId>) {
        self.nodes[id].right = child;
        if let Some(c) = child {
            self.nodes[c].parent = Some(id);
        }
    }

    #[inline]
    pub(crate) fn detach(&mut self, id: NodeId) {
        self.nodes[id].parent = None;
    }

    /// Exchange the values held by two live nodes, leaving links and levels alone.
    pub(crate) fn swap_values(&mut self, a: NodeId, b: NodeId) {
        if let Some((x, y)) = self.nodes.get_pair_mut(a, b) {
            std::mem::swap(&mut x.value, &mut y.value);
        }
    }

    /// Remove a horizontal left link with a right rotation. Levels are unchanged.
    ///
    /// ```text
    ///       id             l
    ///      /  \           / \
    ///     l    c    =>   a   id
    ///    / \                /  \
    ///   a   b              b    c
    /// ```
    /// Returns the new subtree root, which inherits `id`'s parent.
    pub(crate) fn skew(&mut self, id: NodeId) -> NodeId {
        let Some(l) = self.left(id) else {
            return id;
        };
        if self.nodes[l].level != self.nodes[id].level {
            return id;
        }
        let parent = self.parent(id);
        let moved = self.right(l);
        self.set_left(id, moved);
        self.set_right(l, Some(id));
        self.nodes[l].parent = parent;
        l
    }

    /// Remove two consecutive horizontal right links with a left rotation, promoting the
    /// middle node one level. Returns the new subtree root, which inherits `id`'s parent.
    pub(crate) fn split(&mut self, id: NodeId) -> NodeId {
        let Some(r) = self.right(id) else {
            return id;
        };
        let Some(rr) = self.right(r) else {
            return id;
        };
        if self.nodes[rr].level != self.nodes[id].level {
            return id;
        }
        let parent = self.parent(id);
        let moved = self.left(r);
        self.set_right(id, moved);
        self.set_left(r, Some(id));
        self.nodes[r].level += 1;
        self.nodes[r].parent = parent;
        tracing::trace!(level = self.nodes[r].level, "aa-tree split promoted node");
        r
    }

    /// Lower `id` (and a right child that would otherwise sit above it) to one more than
    /// its lowest child. Never raises a level.
    ///
    /// A missing child counts as level 0 rather than making this a no-op, so a node
    /// that loses a child always drops back to level 1.
    pub(crate) fn decrease_level(&mut self, id: NodeId) {
        let left = self.left(id);
        let right = self.right(id);
        let should_be = self.level(left).min(self.level(right)) + 1;
        if should_be >= self.nodes[id].level {
            return;
        }
        self.nodes[id].level = should_be;
        if let Some(r) = right {
            if should_be < self.nodes[r].level {
                self.nodes[r].level = should_be;
            }
        }
    }

    /// Left-most node of the subtree rooted at `id`.
    pub(crate) fn min_node(&self, mut id: NodeId) -> NodeId {
        while let Some(l) = self.left(id) {
            id = l;
        }
        id
    }

    /// Right-most node of the subtree rooted at `id`.
    pub(crate) fn max_node(&self, mut id: NodeId) -> NodeId {
        while let Some(r) = self.right(id) {
            id = r;
        }
        id
    }

    /// In-order predecessor: right-most node of the left subtree, or else the first ancestor
    /// reached by climbing out of a right child.
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(l) = self.left(id) {
            return Some(self.max_node(l));
        }
        let mut child = id;
        while let Some(p) = self.parent(child) {
            if self.right(p) == Some(child) {
                return Some(p);
            }
            child = p;
        }
        None
    }

    /// In-order successor, mirror of [`NodeArena::predecessor`].
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(r) = self.right(id) {
            return Some(self.min_node(r));
        }
        let mut child = id;
        while let Some(p) = self.parent(child) {
            if self.left(p) == Some(child) {
                return Some(p);
            }
            child = p;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::node::NodeArena;

    // Builds  a(1) -> right b(1) -> right c(1), the shape split repairs.
    #[test]
    fn split_promotes_middle() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let c = arena.alloc(3);
        arena.set_right(a, Some(b));
        arena.set_right(b, Some(c));

        let root = arena.split(a);
        assert_eq!(root, b);
        assert_eq!(arena.node(b).level, 2);
        assert_eq!(arena.left(b), Some(a));
        assert_eq!(arena.right(b), Some(c));
        assert_eq!(arena.parent(a), Some(b));
        assert_eq!(arena.parent(b), None);
        assert_eq!(arena.right(a), None);
    }

    #[test]
    fn split_leaves_single_horizontal_link() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        arena.set_right(a, Some(b));
        assert_eq!(arena.split(a), a);
        assert_eq!(arena.node(a).level, 1);
    }

    #[test]
    fn skew_rotates_horizontal_left() {
        let mut arena = NodeArena::new();
        let b = arena.alloc(2);
        let a = arena.alloc(1);
        let c = arena.alloc(3);
        arena.set_left(b, Some(a));
        arena.set_right(b, Some(c));

        let root = arena.skew(b);
        assert_eq!(root, a);
        assert_eq!(arena.right(a), Some(b));
        assert_eq!(arena.left(b), None);
        assert_eq!(arena.right(b), Some(c));
        assert_eq!(arena.parent(b), Some(a));
        assert_eq!(arena.node(a).level, 1);
        assert_eq!(arena.node(b).level, 1);
    }

    #[test]
    fn skew_ignores_lower_left() {
        let mut arena = NodeArena::new();
        let b = arena.alloc(2);
        let a = arena.alloc(1);
        arena.node_mut(b).level = 2;
        arena.set_left(b, Some(a));
        assert_eq!(arena.skew(b), b);
    }

    #[test]
    fn decrease_level_is_monotonic() {
        let mut arena = NodeArena::new();
        let p = arena.alloc(2);
        let r = arena.alloc(3);
        arena.node_mut(p).level = 2;
        arena.node_mut(r).level = 2;
        arena.set_right(p, Some(r));

        // Left child missing: p drops to 1 and drags r with it.
        arena.decrease_level(p);
        assert_eq!(arena.node(p).level, 1);
        assert_eq!(arena.node(r).level, 1);

        // Already minimal, nothing moves.
        arena.decrease_level(p);
        assert_eq!(arena.node(p).level, 1);
    }

    #[test]
    fn predecessor_and_successor_walk_parents() {
        let mut arena = NodeArena::new();
        let n20 = arena.alloc(20);
        let n10 = arena.alloc(10);
        let n30 = arena.alloc(30);
        let n15 = arena.alloc(15);
        arena.set_left(n20, Some(n10));
        arena.set_right(n20, Some(n30));
        arena.set_right(n10, Some(n15));

        assert_eq!(arena.predecessor(n20), Some(n15));
        assert_eq!(arena.successor(n20), Some(n30));
        assert_eq!(arena.successor(n15), Some(n20));
        assert_eq!(arena.predecessor(n15), Some(n10));
        assert_eq!(arena.predecessor(n10), None);
        assert_eq!(arena.successor(n30), None);
    }
}
