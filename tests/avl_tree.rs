use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use avl_ostree::{AvlTree, InvariantError, NodeRef, Rank};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

/// Routes the tree's trace events to the test output; filter with `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn keys_of(tree: &AvlTree<i64>) -> Vec<i64> {
    tree.iter().copied().collect()
}

fn key_of(node: Option<NodeRef<'_, i64>>) -> Option<i64> {
    node.map(|node| *node.key())
}

fn random_keys(n: usize) -> Vec<i64> {
    // Deterministic LCG so failures reproduce.
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Take(i64),
    Contains(i64),
    First,
    Last,
    FindByRank(usize),
    RankOf(i64),
    LowerBound(i64),
    UpperBound(i64),
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        8 => value_strategy().prop_map(SetOp::Insert),
        4 => value_strategy().prop_map(SetOp::Remove),
        1 => value_strategy().prop_map(SetOp::Take),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
        2 => any::<usize>().prop_map(SetOp::FindByRank),
        2 => value_strategy().prop_map(SetOp::RankOf),
        2 => value_strategy().prop_map(SetOp::LowerBound),
        2 => value_strategy().prop_map(SetOp::UpperBound),
    ]
}

#[derive(Debug, Clone)]
enum MultiOp {
    Insert(i64),
    Remove(i64),
    RankOf(i64),
    LowerBound(i64),
    UpperBound(i64),
}

fn multi_op_strategy() -> impl Strategy<Value = MultiOp> {
    let value = -50i64..50i64;
    prop_oneof![
        5 => value.clone().prop_map(MultiOp::Insert),
        3 => value.clone().prop_map(MultiOp::Remove),
        1 => value.clone().prop_map(MultiOp::RankOf),
        1 => value.clone().prop_map(MultiOp::LowerBound),
        1 => value.prop_map(MultiOp::UpperBound),
    ]
}

// ─── Randomized comparison against std ───────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both AvlTree and BTreeSet and
    /// asserts identical results at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        init_tracing();
        let mut tree: AvlTree<i64> = AvlTree::new();
        let mut set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match *op {
                SetOp::Insert(v) => {
                    prop_assert_eq!(tree.insert(v), set.insert(v), "insert({})", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(tree.remove(&v), set.remove(&v), "remove({})", v);
                }
                SetOp::Take(v) => {
                    prop_assert_eq!(tree.take(&v), set.take(&v), "take({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(tree.contains(&v), set.contains(&v), "contains({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(tree.first(), set.first(), "first()");
                }
                SetOp::Last => {
                    prop_assert_eq!(tree.last(), set.last(), "last()");
                }
                SetOp::FindByRank(raw) => {
                    let rank = raw % (set.len() + 2);
                    let expected = rank.checked_sub(1).and_then(|index| set.iter().nth(index));
                    prop_assert_eq!(tree.find_by_rank(rank), expected, "find_by_rank({})", rank);
                }
                SetOp::RankOf(v) => {
                    let expected = set.contains(&v).then(|| set.range(..v).count() + 1);
                    prop_assert_eq!(tree.rank_of(&v), expected, "rank_of({})", v);
                }
                SetOp::LowerBound(v) => {
                    let found = tree.lower_bound(&v).map(|node| node.key());
                    prop_assert_eq!(found, set.range(v..).next(), "lower_bound({})", v);
                }
                SetOp::UpperBound(v) => {
                    let found = tree.upper_bound(&v).map(|node| node.key());
                    prop_assert_eq!(found, set.range((Excluded(v), Unbounded)).next(), "upper_bound({})", v);
                }
            }
            prop_assert_eq!(tree.len(), set.len());
        }

        prop_assert_eq!(tree.verify(), Ok(()));
        prop_assert_eq!(keys_of(&tree), set.into_iter().collect::<Vec<_>>());
    }

    /// Multiset semantics: equivalent keys are kept, and lookups address the first.
    #[test]
    fn multi_ops_match_sorted_vec(ops in proptest::collection::vec(multi_op_strategy(), 0..TEST_SIZE)) {
        init_tracing();
        let mut tree: AvlTree<i64> = AvlTree::new();
        let mut model: Vec<i64> = Vec::new();

        for op in &ops {
            match *op {
                MultiOp::Insert(v) => {
                    tree.insert_multi(v);
                    let at = model.partition_point(|&k| k <= v);
                    model.insert(at, v);
                }
                MultiOp::Remove(v) => {
                    let at = model.partition_point(|&k| k < v);
                    let expected = model.get(at) == Some(&v);
                    if expected {
                        model.remove(at);
                    }
                    prop_assert_eq!(tree.remove(&v), expected, "remove({})", v);
                }
                MultiOp::RankOf(v) => {
                    let at = model.partition_point(|&k| k < v);
                    let expected = (model.get(at) == Some(&v)).then_some(at + 1);
                    prop_assert_eq!(tree.rank_of(&v), expected, "rank_of({})", v);
                }
                MultiOp::LowerBound(v) => {
                    let at = model.partition_point(|&k| k < v);
                    let rank = tree.lower_bound(&v).map(|node| node.rank());
                    prop_assert_eq!(rank, (at < model.len()).then_some(at + 1), "lower_bound({})", v);
                }
                MultiOp::UpperBound(v) => {
                    let at = model.partition_point(|&k| k <= v);
                    let rank = tree.upper_bound(&v).map(|node| node.rank());
                    prop_assert_eq!(rank, (at < model.len()).then_some(at + 1), "upper_bound({})", v);
                }
            }
        }

        prop_assert_eq!(tree.verify(), Ok(()));
        prop_assert_eq!(keys_of(&tree), model);
    }

    /// Inserting a fresh key and removing it again restores the same key sequence.
    #[test]
    fn insert_then_remove_is_identity(keys in proptest::collection::btree_set(value_strategy(), 0..300), extra in 500i64..1000) {
        init_tracing();
        let mut tree: AvlTree<i64> = keys.iter().copied().collect();
        let before = keys_of(&tree);

        prop_assert!(tree.insert(extra));
        prop_assert_eq!(tree.len(), before.len() + 1);
        prop_assert!(tree.remove(&extra));

        prop_assert_eq!(keys_of(&tree), before);
        prop_assert_eq!(tree.verify(), Ok(()));
    }

    /// Every rank from 1 to len maps to a key whose rank maps back.
    #[test]
    fn find_by_rank_inverts_rank_of(keys in proptest::collection::vec(value_strategy(), 1..400)) {
        init_tracing();
        let tree: AvlTree<i64> = keys.into_iter().collect();
        for rank in 1..=tree.len() {
            let key = tree.find_by_rank(rank).unwrap();
            prop_assert_eq!(tree.rank_of(key), Some(rank));
            prop_assert_eq!(tree[Rank(rank)], *key);
        }
        prop_assert_eq!(tree.find_by_rank(0), None);
        prop_assert_eq!(tree.find_by_rank(tree.len() + 1), None);
    }
}

// ─── Worked examples ─────────────────────────────────────────────────────────

fn scenario_tree() -> AvlTree<i64> {
    let mut tree = AvlTree::new();
    for key in [100, 200, 50, 20, 10, 1, 2, 3] {
        assert!(tree.insert(key));
    }
    tree
}

#[test]
fn ranks_after_mixed_inserts() {
    init_tracing();
    let tree = scenario_tree();
    let by_rank: Vec<i64> = (1..=8).map(|rank| *tree.find_by_rank(rank).unwrap()).collect();
    assert_eq!(by_rank, [1, 2, 3, 10, 20, 50, 100, 200]);

    // A tree of height 3 holds at most 7 keys.
    assert_eq!(tree.height(), 4);
    assert_eq!(tree.verify(), Ok(()));
}

#[test]
fn bounds_on_scenario_tree() {
    let tree = scenario_tree();
    assert_eq!(key_of(tree.lower_bound(&40)), Some(50));
    assert_eq!(key_of(tree.upper_bound(&100)), Some(200));
    assert_eq!(key_of(tree.lower_bound(&1000)), None);
    assert_eq!(key_of(tree.lower_bound(&50)), Some(50));
    assert_eq!(key_of(tree.upper_bound(&40)), Some(50));
    assert_eq!(key_of(tree.lower_bound(&60)), Some(100));
    assert_eq!(key_of(tree.upper_bound(&0)), Some(1));
    assert_eq!(key_of(tree.upper_bound(&200)), None);
}

#[test]
fn remove_shifts_later_ranks() {
    let mut tree = scenario_tree();
    assert!(tree.remove(&20));
    assert!(!tree.remove(&20));
    assert_eq!(keys_of(&tree), [1, 2, 3, 10, 50, 100, 200]);
    assert_eq!(tree.rank_of(&50), Some(5));
    assert_eq!(tree.verify(), Ok(()));
}

#[test]
fn ascending_thousand_then_drain() {
    let mut tree = AvlTree::new();
    for key in 0..1000 {
        tree.insert(key);
    }
    assert_eq!(tree.height(), 10);
    assert_eq!(tree.len(), 1000);
    assert_eq!(tree.verify(), Ok(()));

    for key in 0..1000 {
        assert!(tree.remove(&key), "remove({key})");
    }
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.len(), 0);
    assert!(tree.root().is_none());
}

#[test]
fn successor_walk_visits_every_key() {
    let keys = random_keys(1000);
    let tree: AvlTree<i64> = keys.iter().copied().collect();
    let expected: Vec<i64> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

    let mut forward = Vec::new();
    let mut node = tree.first_node();
    while let Some(current) = node {
        forward.push(*current.key());
        node = tree.successor(current);
    }
    assert_eq!(forward, expected);

    let mut backward = Vec::new();
    let mut node = tree.last_node();
    while let Some(current) = node {
        backward.push(*current.key());
        node = tree.predecessor(current);
    }
    backward.reverse();
    assert_eq!(backward, expected);
}

#[test]
fn successor_steps_through_equal_keys() {
    let mut tree = AvlTree::new();
    for key in [4, 9, 2, 5, 4, 2, 1, 2, 3, 2, 1, 7, 3, 2] {
        tree.insert_multi(key);
    }
    let first_two = tree.find(&2).unwrap();
    assert_eq!(first_two.rank(), 3);

    let mut run = 0;
    let mut node = Some(first_two);
    while let Some(current) = node.filter(|node| *node.key() == 2) {
        run += 1;
        node = tree.successor(current);
    }
    assert_eq!(run, 5);
    assert_eq!(node.map(|node| *node.key()), Some(3));
    assert_eq!(tree.predecessor(first_two).map(|node| *node.key()), Some(1));
}

#[test]
#[should_panic(expected = "`AvlTree::successor()` - node belongs to a different tree!")]
fn successor_rejects_foreign_node() {
    let a = AvlTree::from([1, 2]);
    let b = AvlTree::from([1, 2]);
    let _ = b.successor(a.first_node().unwrap());
}

#[test]
fn set_insert_keeps_first_of_equivalent_keys() {
    let mut tree = AvlTree::with_comparator(|a: &(u8, &str), b: &(u8, &str)| a.0 < b.0);
    assert!(tree.insert((1, "first")));
    assert!(!tree.insert((1, "second")));
    tree.insert_multi((1, "third"));

    assert_eq!(tree.to_vec(), [&(1, "first"), &(1, "third")]);
    assert_eq!(tree.take(&(1, "")), Some((1, "first")));
    assert_eq!(tree.take(&(1, "")), Some((1, "third")));
    assert!(tree.is_empty());
}

#[test]
fn clear_keeps_tree_usable() {
    let mut tree: AvlTree<i64> = (0..100).collect();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.first(), None);
    assert_eq!(tree.find_by_rank(1), None);

    tree.extend([3, 1, 2]);
    assert_eq!(keys_of(&tree), [1, 2, 3]);
    assert_eq!(tree.verify(), Ok(()));
}

#[test]
fn clones_are_independent() {
    let original = AvlTree::from([1, 2, 3]);
    let mut copy = original.clone();
    copy.insert(4);
    copy.remove(&1);

    assert_eq!(original.to_vec(), [&1, &2, &3]);
    assert_eq!(copy.to_vec(), [&2, &3, &4]);
    assert_eq!(copy.verify(), Ok(()));
}

#[test]
fn for_each_and_iter_agree() {
    let tree: AvlTree<i64> = random_keys(200).into_iter().collect();
    let mut visited = Vec::new();
    tree.for_each(|key| visited.push(*key));

    assert_eq!(visited, keys_of(&tree));
    assert_eq!(tree.iter().len(), tree.len());
    assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), visited.iter().rev().copied().collect::<Vec<_>>());
    assert_eq!((&tree).into_iter().next(), tree.min());
    assert_eq!(tree.iter().last(), tree.max());
}

#[test]
fn debug_lists_keys_in_order() {
    let tree = AvlTree::from([3, 1, 2]);
    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
}

#[test]
fn descending_comparator_reverses_order() {
    let mut tree = AvlTree::with_comparator(|a: &i64, b: &i64| b < a);
    tree.extend(random_keys(100));
    let keys: Vec<i64> = tree.iter().copied().collect();
    assert!(keys.windows(2).all(|pair| pair[0] > pair[1]));
    assert_eq!(tree.verify(), Ok(()));

    // Bounds follow the tree's order, not the integers'.
    let middle = keys[50];
    assert_eq!(tree.upper_bound(&middle).map(|node| *node.key()), Some(keys[51]));
}

#[test]
fn inconsistent_comparator_is_detected() {
    // Claims every key is less than every other; the tree stays safe but unordered.
    let mut tree = AvlTree::with_comparator(|_: &i64, _: &i64| true);
    for key in 0..20 {
        tree.insert(key);
    }
    assert_eq!(tree.len(), 20);
    assert!(matches!(tree.verify(), Err(InvariantError::OutOfOrder { .. })));
}
