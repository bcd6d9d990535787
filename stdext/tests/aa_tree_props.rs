//! Property tests: the AA-tree against a `BTreeSet` model.

use std::collections::BTreeSet;

use proptest::prelude::*;
use stdext::stats::TreeStatsTrait;
use stdext::tree::AaTree;

#[derive(Clone, Debug)]
enum SetOp {
    Add(u16),
    Remove(u16),
    Contains(u16),
    Clear,
}

fn set_op() -> impl Strategy<Value = SetOp> {
    // A narrow key space so removes and duplicate adds actually hit.
    prop_oneof![
        6 => (0u16..512).prop_map(SetOp::Add),
        4 => (0u16..512).prop_map(SetOp::Remove),
        2 => (0u16..512).prop_map(SetOp::Contains),
        1 => Just(SetOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_btreeset(ops in prop::collection::vec(set_op(), 1..400)) {
        let mut tree = AaTree::<u16>::new();
        let mut model = BTreeSet::new();

        for op in &ops {
            match *op {
                SetOp::Add(k) => prop_assert_eq!(tree.add(k), model.insert(k)),
                SetOp::Remove(k) => prop_assert_eq!(tree.remove(&k).is_some(), model.remove(&k)),
                SetOp::Contains(k) => prop_assert_eq!(tree.contains(&k), model.contains(&k)),
                SetOp::Clear => {
                    tree.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(tree.len(), model.len());
            if let Err(violation) = tree.check_invariants() {
                return Err(TestCaseError::fail(format!("{violation} after {op:?}")));
            }
        }

        prop_assert!(tree.iter().eq(model.iter()));
        prop_assert_eq!(tree.first(), model.first());
        prop_assert_eq!(tree.last(), model.last());
    }

    #[test]
    fn duplicates_leave_tree_unchanged(keys in prop::collection::vec(any::<i32>(), 1..200)) {
        let mut tree: AaTree<i32> = keys.iter().copied().collect();
        let before: Vec<i32> = tree.iter().copied().collect();
        let stats = tree.get_tree_stats();

        for k in &keys {
            prop_assert!(!tree.add(*k));
        }
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), before);
        prop_assert_eq!(tree.get_tree_stats(), stats);
    }

    #[test]
    fn neighbours_follow_sorted_order(keys in prop::collection::btree_set(any::<u32>(), 1..200)) {
        let tree: AaTree<u32> = keys.iter().copied().collect();
        let sorted: Vec<u32> = keys.into_iter().collect();

        for (i, k) in sorted.iter().enumerate() {
            let node = tree.node(k).expect("inserted key has a node");
            prop_assert_eq!(node.predecessor().map(|n| *n.value()), i.checked_sub(1).map(|j| sorted[j]));
            prop_assert_eq!(node.successor().map(|n| *n.value()), sorted.get(i + 1).copied());
        }
    }

    #[test]
    fn level_bounds_height(keys in prop::collection::vec(any::<u64>(), 1..2000)) {
        let tree: AaTree<u64> = keys.into_iter().collect();
        let stats = tree.get_tree_stats();
        // Every root-to-leaf path has at most two nodes per level.
        prop_assert!(stats.max_height <= 2 * stats.max_level as usize);
        prop_assert_eq!(stats.num_nodes, tree.len());
    }
}
