//! End-to-end scenarios exercising the public tree API.

use std::sync::Arc;
use std::thread;

use pagetree::{BTree, Descending, Error, RefId};

fn in_order_keys(tree: &BTree<i32>) -> Vec<i32> {
    let mut keys = Vec::new();
    tree.for_each_in_order(|e, _| keys.push(e.key));
    keys
}

#[test]
fn test_classic_insert_then_targeted_deletes() {
    // Order-3 ascending tree; the classic textbook sequence.
    let tree: BTree<i32> = BTree::new(3, true).unwrap();
    for k in [50, 30, 70, 20, 40, 60, 80] {
        tree.insert(k, RefId::new(k as u64 * 10)).unwrap();
    }
    assert_eq!(in_order_keys(&tree), vec![20, 30, 40, 50, 60, 70, 80]);

    // Delete a leaf key, then a now-edge key, then a mid key; the order
    // invariant must hold after every step and validate() confirms no page
    // was left out of bounds.
    for k in [20, 30, 50] {
        tree.remove(&k, RefId::new(k as u64 * 10)).unwrap();
        let keys = in_order_keys(&tree);
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted, "order broken after deleting {k}");
        assert!(!keys.contains(&k));
        tree.validate().unwrap();
    }
    assert_eq!(tree.len(), 4);
}

#[test]
fn test_sequential_inserts_force_splits() {
    let tree: BTree<i32> = BTree::new(3, true).unwrap();
    for k in 1..=50 {
        tree.insert(k, RefId::new(k as u64)).unwrap();
        tree.validate().unwrap();
    }
    assert_eq!(in_order_keys(&tree), (1..=50).collect::<Vec<_>>());
    // 50 sequential keys cannot fit in two levels of order-3 pages, so
    // three-way splits (including root splits) must have happened.
    assert!(tree.height() >= 3, "height {} too small", tree.height());
}

#[test]
fn test_root_merge_shrinks_height_by_one() {
    // Smallest tree with a minimum-filled second level: 8 keys split the
    // root into three minimum-filled children below two root keys.
    let tree: BTree<i32> = BTree::new(3, true).unwrap();
    for k in 1..=8 {
        tree.insert(k, RefId::new(k as u64)).unwrap();
    }
    assert_eq!(tree.height(), 2);

    // The children cannot lend each other anything, so the first removal
    // that underflows a leaf folds everything back into the root.
    tree.remove(&1, RefId::new(1)).unwrap();
    assert_eq!(tree.height(), 1);
    assert_eq!(in_order_keys(&tree), (2..=8).collect::<Vec<_>>());
    tree.validate().unwrap();
}

#[test]
fn test_duplicate_rejected_without_change() {
    let tree: BTree<i32> = BTree::new(3, true).unwrap();
    tree.insert(10, RefId::new(100)).unwrap();
    tree.insert(20, RefId::new(200)).unwrap();

    assert_eq!(tree.insert(10, RefId::new(999)).unwrap_err(), Error::DuplicateKey);
    assert_eq!(tree.len(), 2);
    // Original reference survives.
    assert_eq!(tree.search(&10).unwrap().ref_id, RefId::new(100));
}

#[test]
fn test_survivors_after_mixed_churn() {
    let tree: BTree<i32> = BTree::new(4, true).unwrap();
    for k in 0..200 {
        tree.insert(k, RefId::new(k as u64)).unwrap();
    }
    for k in (0..200).step_by(3) {
        tree.remove(&k, RefId::new(k as u64)).unwrap();
        tree.validate().unwrap();
    }
    for k in 0..200 {
        let found = tree.search(&k).is_some();
        assert_eq!(found, k % 3 != 0, "wrong membership for {k}");
    }
    assert_eq!(tree.len(), 200 - 200usize.div_ceil(3));
}

#[test]
fn test_remove_everything_leaves_empty_tree() {
    let tree: BTree<i32> = BTree::new(3, true).unwrap();
    let mut keys: Vec<i32> = (0..60).collect();
    for &k in &keys {
        tree.insert(k, RefId::new(k as u64)).unwrap();
    }
    // Remove in an interleaved order to hit merges at several levels.
    keys.sort_by_key(|k| (k % 7, *k));
    for &k in &keys {
        tree.remove(&k, RefId::new(k as u64)).unwrap();
        tree.validate().unwrap();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
}

#[test]
fn test_use_counter_per_key() {
    let tree: BTree<i32> = BTree::new(3, true).unwrap();
    for k in 1..=30 {
        tree.insert(k, RefId::new(k as u64)).unwrap();
    }
    for _ in 0..5 {
        tree.search(&17).unwrap();
    }
    assert!(tree.search(&99).is_none());
    assert_eq!(tree.search(&17).unwrap().use_count, 6);
    // Other keys and structural ops leave counters alone.
    assert_eq!(tree.search(&4).unwrap().use_count, 1);
    tree.remove(&18, RefId::new(18)).unwrap();
    assert_eq!(tree.search(&17).unwrap().use_count, 7);
}

#[test]
fn test_descending_tree_traversal() {
    let tree: BTree<i32, Descending> = BTree::new(3, true).unwrap();
    for k in 1..=25 {
        tree.insert(k, RefId::new(k as u64)).unwrap();
    }
    let mut keys = Vec::new();
    tree.for_each_in_order(|e, _| keys.push(e.key));
    assert_eq!(keys, (1..=25).rev().collect::<Vec<_>>());
    tree.validate().unwrap();
}

#[test]
fn test_concurrent_inserts_under_tree_lock() {
    let tree: Arc<BTree<i32>> = Arc::new(BTree::new(5, true).unwrap());

    let mut handles = vec![];
    for t in 0..3 {
        let tree = Arc::clone(&tree);
        handles.push(thread::spawn(move || {
            let start = 1 + t * 100;
            for k in start..start + 100 {
                tree.insert(k, RefId::new(k as u64 * 10)).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(tree.len(), 300);
    assert_eq!(in_order_keys(&tree), (1..=300).collect::<Vec<_>>());
    tree.validate().unwrap();
}

#[test]
fn test_concurrent_mixed_readers_and_writers() {
    let tree: Arc<BTree<i32>> = Arc::new(BTree::new(4, true).unwrap());
    for k in 0..100 {
        tree.insert(k, RefId::new(k as u64)).unwrap();
    }

    let mut handles = vec![];
    for t in 0..4 {
        let tree = Arc::clone(&tree);
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                if t % 2 == 0 {
                    let _ = tree.search(&(i * 2));
                } else {
                    let k = 100 + t * 50 + i;
                    tree.insert(k, RefId::new(k as u64)).unwrap();
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(tree.len(), 200);
    tree.validate().unwrap();
}
