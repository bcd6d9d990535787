#![no_main]

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use stdext::tree::AaTree;

#[derive(Arbitrary, Debug)]
enum SetMethod {
    Add { key: u16 },
    Remove { key: u16 },
    Contains { key: u16 },
    Get { key: u16 },
    Clear,
}

fuzz_target!(|methods: Vec<SetMethod>| {
    let mut tree = AaTree::<u16>::new();
    let mut bt_set = BTreeSet::<u16>::new();

    for m_c in methods.chunks(1024) {
        for m in m_c {
            match m {
                SetMethod::Add { key } => {
                    assert_eq!(tree.add(*key), bt_set.insert(*key));
                }
                SetMethod::Remove { key } => {
                    assert_eq!(tree.remove(key), bt_set.take(key));
                }
                SetMethod::Contains { key } => {
                    assert_eq!(tree.contains(key), bt_set.contains(key));
                }
                SetMethod::Get { key } => {
                    assert_eq!(tree.get(key), bt_set.get(key));
                }
                SetMethod::Clear => {
                    tree.clear();
                    bt_set.clear();
                }
            }
        }
        assert_eq!(tree.len(), bt_set.len());
        if let Err(violation) = tree.check_invariants() {
            panic!("{violation}: {tree:?}");
        }
    }

    assert!(tree.iter().eq(bt_set.iter()), "{tree:?} != {bt_set:?}");
});
