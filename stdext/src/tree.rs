//! AA-tree ordered set.
//!
//! This module contains [`AaTree`], a self-balancing binary search tree in the AA
//! (Arne Andersson) flavour: every node carries a level, only right links may be
//! horizontal, and two local operations (skew and split) keep the height logarithmic.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::OrderedBy;
use crate::error::InvariantViolation;
use crate::iter::Iter;
use crate::node::{NodeArena, NodeId};

/// An ordered set backed by an arena of AA-tree nodes.
///
/// Values are ordered against each other with [`OrderedBy<V>`] and looked up by a key
/// type `K` with [`OrderedBy<K>`]. For plain `Ord` types `K` defaults to the value type
/// itself, so `AaTree<u64>` works out of the box.
///
/// ## Examples
///
/// ```rust
/// use stdext::tree::AaTree;
///
/// let mut tree = AaTree::<u32>::new();
/// assert!(tree.add(20));
/// assert!(tree.add(10));
/// assert!(!tree.add(20)); // duplicates are rejected
///
/// assert!(tree.contains(&10));
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
///
/// assert_eq!(tree.remove(&10), Some(10));
/// assert_eq!(tree.remove(&10), None);
/// ```
///
/// Looking records up by a separate key:
///
/// ```rust
/// use std::cmp::Ordering;
/// use stdext::OrderedBy;
/// use stdext::tree::AaTree;
///
/// #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// impl OrderedBy<u64> for User {
///     fn cmp_to(&self, key: &u64) -> Ordering {
///         self.id.cmp(key)
///     }
/// }
///
/// let mut users = AaTree::<User, u64>::new();
/// users.add(User { id: 7, name: "ada".into() });
/// assert_eq!(users.get(&7).map(|u| u.name.as_str()), Some("ada"));
/// ```
///
/// The tree is not synchronized; mutate it from one thread at a time.
pub struct AaTree<V, K: ?Sized = V> {
    nodes: NodeArena<V>,
    root: Option<NodeId>,
    count: usize,
    _key: PhantomData<fn(&K)>,
}

impl<V, K: ?Sized> Default for AaTree<V, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K: ?Sized> AaTree<V, K> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            root: None,
            count: 0,
            _key: PhantomData,
        }
    }

    /// Number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drop every value. The arena is emptied along with the root.
    pub fn clear(&mut self) {
        tracing::trace!(count = self.count, "aa-tree cleared");
        self.root = None;
        self.count = 0;
        self.nodes.clear();
    }

    /// In-order (ascending) iterator over the stored values.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.nodes, self.root, self.count)
    }

    /// Read-only cursor on the root node.
    pub fn root(&self) -> Option<NodeRef<'_, V>> {
        self.root.map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Smallest value.
    pub fn first(&self) -> Option<&V> {
        let root = self.root?;
        Some(&self.nodes.node(self.nodes.min_node(root)).value)
    }

    /// Largest value.
    pub fn last(&self) -> Option<&V> {
        let root = self.root?;
        Some(&self.nodes.node(self.nodes.max_node(root)).value)
    }
}

impl<V, K> AaTree<V, K>
where
    V: OrderedBy<V> + OrderedBy<K>,
    K: ?Sized,
{
    /// Insert `item`. Returns `false`, leaving the tree untouched, if an equal value is
    /// already stored.
    pub fn add(&mut self, item: V) -> bool {
        match self.insert_at(self.root, item) {
            Ok(root) => {
                self.nodes.detach(root);
                self.root = Some(root);
                self.count += 1;
                true
            }
            Err(_) => false,
        }
    }

    /// True if a value matching `key` is stored.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// The stored value matching `key`.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|id| &self.nodes.node(id).value)
    }

    /// Cursor on the node holding the value matching `key`.
    pub fn node(&self, key: &K) -> Option<NodeRef<'_, V>> {
        self.find(key).map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Remove the value equal to `item` and return it. Removing an absent value is a no-op
    /// and leaves the count alone.
    pub fn remove(&mut self, item: &V) -> Option<V> {
        let root = self.root?;
        let mut removed = None;
        let new_root = self.remove_at(root, item, &mut removed);
        if removed.is_some() {
            self.count -= 1;
        }
        if let Some(r) = new_root {
            self.nodes.detach(r);
        }
        self.root = new_root;
        removed
    }

    fn find(&self, key: &K) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            cur = match <V as OrderedBy<K>>::cmp_to(&self.nodes.node(id).value, key) {
                Ordering::Less => self.nodes.right(id),
                Ordering::Greater => self.nodes.left(id),
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    // Returns the new root of the subtree, or hands the item back on a duplicate. Nothing is
    // rebalanced on the duplicate path, so the tree is left exactly as it was.
    fn insert_at(&mut self, node: Option<NodeId>, item: V) -> Result<NodeId, V> {
        let Some(id) = node else {
            return Ok(self.nodes.alloc(item));
        };
        match <V as OrderedBy<V>>::cmp_to(&item, &self.nodes.node(id).value) {
            Ordering::Less => {
                let child = self.insert_at(self.nodes.left(id), item)?;
                self.nodes.set_left(id, Some(child));
            }
            Ordering::Greater => {
                let child = self.insert_at(self.nodes.right(id), item)?;
                self.nodes.set_right(id, Some(child));
            }
            Ordering::Equal => return Err(item),
        }
        let id = self.nodes.skew(id);
        Ok(self.nodes.split(id))
    }

    fn remove_at(&mut self, id: NodeId, item: &V, removed: &mut Option<V>) -> Option<NodeId> {
        let (left, right, is_leaf) = {
            let node = self.nodes.node(id);
            (node.left, node.right, node.is_leaf())
        };
        match <V as OrderedBy<V>>::cmp_to(item, &self.nodes.node(id).value) {
            Ordering::Less => {
                let Some(l) = left else {
                    return Some(id);
                };
                let l = self.remove_at(l, item, removed);
                self.nodes.set_left(id, l);
            }
            Ordering::Greater => {
                let Some(r) = right else {
                    return Some(id);
                };
                let r = self.remove_at(r, item, removed);
                self.nodes.set_right(id, r);
            }
            Ordering::Equal if is_leaf => {
                *removed = self.nodes.release(id);
                tracing::trace!("aa-tree released leaf");
                return None;
            }
            Ordering::Equal => {
                // Move the doomed value down into its predecessor (or successor) leaf, then
                // remove it from that side. The swapped value keeps its in-order position.
                if let Some(l) = left {
                    let donor = self.nodes.max_node(l);
                    self.nodes.swap_values(id, donor);
                    let l = self.remove_at(l, item, removed);
                    self.nodes.set_left(id, l);
                } else if let Some(r) = right {
                    let donor = self.nodes.min_node(r);
                    self.nodes.swap_values(id, donor);
                    let r = self.remove_at(r, item, removed);
                    self.nodes.set_right(id, r);
                }
            }
        }
        if removed.is_none() {
            return Some(id);
        }
        Some(self.rebalance_after_remove(id))
    }

    // decrease-level, skew x3, split x2, from the node down its right spine.
    fn rebalance_after_remove(&mut self, id: NodeId) -> NodeId {
        self.nodes.decrease_level(id);
        let id = self.nodes.skew(id);
        if let Some(r) = self.nodes.right(id) {
            let r = self.nodes.skew(r);
            self.nodes.set_right(id, Some(r));
            if let Some(rr) = self.nodes.right(r) {
                let rr = self.nodes.skew(rr);
                self.nodes.set_right(r, Some(rr));
            }
        }
        let id = self.nodes.split(id);
        if let Some(r) = self.nodes.right(id) {
            let r = self.nodes.split(r);
            self.nodes.set_right(id, Some(r));
        }
        id
    }

    /// Walk the whole tree and verify ordering, level rules, parent links and the count.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.root {
            if self.nodes.parent(root).is_some() {
                return Err(InvariantViolation::ParentLink { position: 0 });
            }
        }

        let mut iter = self.iter();
        let mut prev: Option<NodeId> = None;
        let mut position = 0;
        while let Some(id) = iter.next_id() {
            let node = self.nodes.node(id);
            let level = node.level;

            if let Some(p) = prev {
                let prev_value = &self.nodes.node(p).value;
                if <V as OrderedBy<V>>::cmp_to(prev_value, &node.value) != Ordering::Less {
                    return Err(InvariantViolation::Order { position });
                }
            }

            if node.is_leaf() && level != 1 {
                return Err(InvariantViolation::LeafLevel { position, level });
            }
            if level > 1 && (node.left.is_none() || node.right.is_none()) {
                return Err(InvariantViolation::MissingChild { position, level });
            }
            if let Some(l) = node.left {
                let child = self.nodes.node(l).level;
                if child >= level {
                    return Err(InvariantViolation::HorizontalLeft {
                        position,
                        parent: level,
                        child,
                    });
                }
                if self.nodes.parent(l) != Some(id) {
                    return Err(InvariantViolation::ParentLink { position });
                }
            }
            if let Some(r) = node.right {
                let child = self.nodes.node(r).level;
                if child > level {
                    return Err(InvariantViolation::RightLevel {
                        position,
                        parent: level,
                        child,
                    });
                }
                if self.nodes.parent(r) != Some(id) {
                    return Err(InvariantViolation::ParentLink { position });
                }
                if self.nodes.level(self.nodes.right(r)) >= level {
                    return Err(InvariantViolation::DoubleHorizontalRight { position });
                }
            }

            prev = Some(id);
            position += 1;
        }

        if position != self.count || self.nodes.len() != self.count {
            return Err(InvariantViolation::Count {
                reported: self.count,
                actual: position.max(self.nodes.len()),
            });
        }
        Ok(())
    }
}

impl<V: fmt::Debug, K: ?Sized> fmt::Debug for AaTree<V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, V, K: ?Sized> IntoIterator for &'a AaTree<V, K> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, K> Extend<V> for AaTree<V, K>
where
    V: OrderedBy<V> + OrderedBy<K>,
    K: ?Sized,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}

impl<V, K> FromIterator<V> for AaTree<V, K>
where
    V: OrderedBy<V> + OrderedBy<K>,
    K: ?Sized,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Read-only view of one node, for inspecting the tree's shape.
pub struct NodeRef<'a, V> {
    nodes: &'a NodeArena<V>,
    id: NodeId,
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

impl<'a, V> NodeRef<'a, V> {
    fn new(nodes: &'a NodeArena<V>, id: NodeId) -> Self {
        Self { nodes, id }
    }

    fn to(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.nodes, id))
    }

    pub fn value(&self) -> &'a V {
        &self.nodes.node(self.id).value
    }

    pub fn level(&self) -> u32 {
        self.nodes.node(self.id).level
    }

    pub fn left(&self) -> Option<Self> {
        self.to(self.nodes.left(self.id))
    }

    pub fn right(&self) -> Option<Self> {
        self.to(self.nodes.right(self.id))
    }

    pub fn parent(&self) -> Option<Self> {
        self.to(self.nodes.parent(self.id))
    }

    /// Node holding the next smaller value.
    pub fn predecessor(&self) -> Option<Self> {
        self.to(self.nodes.predecessor(self.id))
    }

    /// Node holding the next larger value.
    pub fn successor(&self) -> Option<Self> {
        self.to(self.nodes.successor(self.id))
    }

    pub fn is_leaf(&self) -> bool {
        self.nodes.node(self.id).is_leaf()
    }

    pub fn is_root(&self) -> bool {
        self.nodes.parent(self.id).is_none()
    }
}

impl<V: fmt::Debug> fmt::Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", self.value())
            .field("level", &self.level())
            .finish()
    }
}
