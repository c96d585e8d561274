use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::{Ordering, max};
use core::mem;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::navigate::{extreme, height_of, rank, step, weight_of};
use super::node::{Node, Side};
use super::weight::Weight;
use crate::compare::Less;
use crate::error::InvariantError;
use crate::hook::{Children, Hook};

/// A hook shared between clones of a tree.
pub(crate) type SharedHook<K, A> = Arc<dyn Hook<K, A> + Send + Sync>;

/// Explicit stack for pre-order walks. AVL height stays well under 64 for any tree
/// that fits in the arena.
type Stack = SmallVec<[Handle; 64]>;

/// The AVL engine backing `AvlTree`.
pub(crate) struct RawAvlTree<K, A, C> {
    /// Arena owning every node; links between nodes are handles into it.
    nodes: Arena<Node<K, A>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// The ordering predicate.
    less: C,
    /// Augmentation hooks, run in order on every recomputed node.
    hooks: Vec<SharedHook<K, A>>,
}

impl<K, A, C> RawAvlTree<K, A, C> {
    /// Creates a new, empty tree.
    pub(crate) fn new(less: C, hooks: Vec<SharedHook<K, A>>, capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            less,
            hooks,
        }
    }

    /// Returns the number of keys in the tree.
    pub(crate) fn len(&self) -> usize {
        weight_of(&self.nodes, self.root)
    }

    /// Returns the height of the tree, zero when empty.
    pub(crate) fn height(&self) -> usize {
        height_of(&self.nodes, self.root)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn nodes(&self) -> &Arena<Node<K, A>> {
        &self.nodes
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, A> {
        self.nodes.get(handle)
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.less
    }

    pub(crate) fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        tracing::debug!(len = self.len(), "clearing tree");
        self.nodes.clear();
        self.root = None;
    }

    /// Handle of the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| extreme(&self.nodes, root, Side::Left))
    }

    /// Handle of the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| extreme(&self.nodes, root, Side::Right))
    }

    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        step(&self.nodes, handle, Side::Right)
    }

    /// Handle of the key at one-based `rank`.
    pub(crate) fn by_rank(&self, rank: usize) -> Option<Handle> {
        if rank == 0 || rank > self.len() {
            return None;
        }

        let mut remaining = rank;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let here = weight_of(&self.nodes, node.left()) + 1;
            match remaining.cmp(&here) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    remaining -= here;
                    current = node.right();
                }
            }
        }

        None
    }

    /// One-based rank of the node at `handle`.
    pub(crate) fn rank_of_handle(&self, handle: Handle) -> usize {
        rank(&self.nodes, handle)
    }

    /// Visits every node in pre-order (parent before children, left before right).
    pub(crate) fn pre_order<'a>(&'a self, mut visit: impl FnMut(Handle, &'a Node<K, A>)) {
        let mut stack: Stack = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            let node = self.nodes.get(handle);
            visit(handle, node);
            stack.extend(node.right());
            stack.extend(node.left());
        }
    }
}

impl<K, A: Default, C> RawAvlTree<K, A, C> {
    /// Runs the hooks for `handle` against its current children.
    fn compute_aug(&self, handle: Handle) -> A {
        let node = self.nodes.get(handle);
        let children = Children {
            key: node.key(),
            left: node.left().map(|left| self.nodes.get(left).aug()),
            right: node.right().map(|right| self.nodes.get(right).aug()),
            weight: node.weight(),
            height: node.height(),
        };

        let mut aug = A::default();
        for hook in &self.hooks {
            hook.update(&mut aug, children);
        }
        aug
    }

    /// Recomputes height, weight and hook outputs of `handle` from its children.
    fn update(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        let weight = Weight::of_children(weight_of(&self.nodes, left), weight_of(&self.nodes, right));
        let height = 1 + max(height_of(&self.nodes, left), height_of(&self.nodes, right));

        let node = self.nodes.get_mut(handle);
        node.weight = weight;
        node.height = u8::try_from(height).expect("`RawAvlTree::update()` - height exceeds `u8::MAX`!");

        if !self.hooks.is_empty() {
            let aug = self.compute_aug(handle);
            self.nodes.get_mut(handle).aug = aug;
        }
    }

    /// Recomputes `current` and every ancestor without restructuring.
    fn refresh(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            self.update(handle);
            current = self.nodes.get(handle).parent();
        }
    }

    /// Recomputes and rebalances `current` and every ancestor up to the root.
    ///
    /// Does not stop early: after a removal a rotation can shorten a subtree and
    /// unbalance a node further up.
    fn retrace(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            self.update(handle);
            let subtree = self.rebalance(handle);
            current = self.nodes.get(subtree).parent();
        }
    }

    /// Restores the AVL condition at `handle`, whose children are already balanced.
    /// Returns the node now occupying `handle`'s former position.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        let left_height = height_of(&self.nodes, left);
        let right_height = height_of(&self.nodes, right);

        if left_height > right_height + 1 {
            if let Some(left) = left
                && self.leans(left, Side::Right)
            {
                self.rotate(left, Side::Left);
            }
            return self.rotate(handle, Side::Right);
        }
        if right_height > left_height + 1 {
            if let Some(right) = right
                && self.leans(right, Side::Left)
            {
                self.rotate(right, Side::Right);
            }
            return self.rotate(handle, Side::Left);
        }
        handle
    }

    /// Whether the subtree on `side` of `handle` is strictly taller than the other one.
    fn leans(&self, handle: Handle, side: Side) -> bool {
        let node = self.nodes.get(handle);
        height_of(&self.nodes, node.child(side)) > height_of(&self.nodes, node.child(side.opposite()))
    }

    /// Rotates `top` down towards `side`, lifting its child from the opposite side.
    /// Returns the lifted node.
    fn rotate(&mut self, top: Handle, side: Side) -> Handle {
        let lifted_side = side.opposite();
        let pivot = self
            .nodes
            .get(top)
            .child(lifted_side)
            .expect("`RawAvlTree::rotate()` - no child to lift!");
        let inner = self.nodes.get(pivot).child(side);
        let parent = self.nodes.get(top).parent();
        tracing::trace!(?top, ?pivot, ?side, "rotate");

        self.nodes.get_mut(top).set_child(lifted_side, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(top);
        }
        self.nodes.get_mut(pivot).set_child(side, Some(top));
        self.nodes.get_mut(top).parent = Some(pivot);
        self.replace_child(parent, top, Some(pivot));

        // The demoted node is now the child; recompute it first.
        self.update(top);
        self.update(pivot);
        pivot
    }

    /// Points whatever link held `old` (a child link of `parent`, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            Some(parent) => {
                let parent_node = self.nodes.get_mut(parent);
                let side = parent_node.side_of(old);
                parent_node.set_child(side, new);
            }
            None => self.root = new,
        }
        if let Some(new) = new {
            self.nodes.get_mut(new).parent = parent;
        }
    }

    /// Removes the node at `handle` and returns its key.
    ///
    /// A node with two children takes over its in-order successor's key, and the
    /// successor (which has no left child) is unlinked in its place.
    pub(crate) fn remove(&mut self, handle: Handle) -> K {
        let node = self.nodes.get(handle);
        if let (Some(_), Some(right)) = (node.left(), node.right()) {
            let successor = extreme(&self.nodes, right, Side::Left);
            tracing::trace!(?handle, ?successor, "substituting successor");
            let successor_key = self.unlink(successor);
            let key = mem::replace(&mut self.nodes.get_mut(handle).key, successor_key);
            // Rebalancing already fixed the shape; only the key-dependent aggregates changed.
            self.refresh(Some(handle));
            return key;
        }
        self.unlink(handle)
    }

    /// Removes a node with at most one child, splicing the child into its place.
    fn unlink(&mut self, handle: Handle) -> K {
        let node = self.nodes.get(handle);
        debug_assert!(
            node.left().is_none() || node.right().is_none(),
            "`RawAvlTree::unlink()` - {handle:?} has two children!"
        );
        let child = node.left().or(node.right());
        let parent = node.parent();
        tracing::trace!(?handle, ?parent, ?child, "splice");

        self.replace_child(parent, handle, child);
        let node = self.nodes.take(handle);
        self.retrace(parent);
        node.key
    }
}

impl<K, A: Default, C: Less<K>> RawAvlTree<K, A, C> {
    /// Inserts `key` as a new leaf and rebalances.
    ///
    /// With `multi` unset an equivalent key already on the search path rejects the
    /// insert and hands `key` back. With `multi` set, ties descend right so equal keys
    /// keep insertion order.
    pub(crate) fn insert(&mut self, key: K, multi: bool) -> Result<Handle, K> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            side = if self.less.less(&key, node.key()) {
                Side::Left
            } else if multi || self.less.less(node.key(), &key) {
                Side::Right
            } else {
                return Err(key);
            };
            parent = Some(handle);
            current = node.child(side);
        }

        let handle = self.nodes.alloc(Node::leaf(key, parent));
        match parent {
            Some(parent) => self.nodes.get_mut(parent).set_child(side, Some(handle)),
            None => self.root = Some(handle),
        }
        tracing::trace!(?handle, ?parent, ?side, "attach");

        self.update(handle);
        self.retrace(parent);
        Ok(handle)
    }

    /// Lowest-ranked node whose key is equivalent to `key`.
    pub(crate) fn find(&self, key: &K) -> Option<Handle> {
        let handle = self.lower_bound(key)?;
        (!self.less.less(key, self.nodes.get(handle).key())).then_some(handle)
    }

    /// First node whose key is not less than `key`.
    pub(crate) fn lower_bound(&self, key: &K) -> Option<Handle> {
        self.first_where(|node_key| !self.less.less(node_key, key))
    }

    /// First node whose key is greater than `key`.
    pub(crate) fn upper_bound(&self, key: &K) -> Option<Handle> {
        self.first_where(|node_key| self.less.less(key, node_key))
    }

    /// Descends to the first node in order for which `qualifies` holds. `qualifies`
    /// must be false for a prefix of the in-order sequence and true for the rest.
    fn first_where(&self, qualifies: impl Fn(&K) -> bool) -> Option<Handle> {
        let mut best = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if qualifies(node.key()) {
                best = Some(handle);
                current = node.left();
            } else {
                current = node.right();
            }
        }
        best
    }

    /// Checks order, balance, height, weight and parent links of the whole tree.
    pub(crate) fn verify(&self) -> Result<(), InvariantError> {
        if let Some(root) = self.root {
            let found = self.nodes.get(root).parent();
            if found.is_some() {
                return Err(InvariantError::ParentMismatch {
                    node: root.slot(),
                    expected: None,
                    found: found.map(Handle::slot),
                });
            }
            self.verify_subtree(root)?;
        }

        let reachable = self.len();
        if reachable != self.nodes.len() {
            return Err(InvariantError::LengthMismatch {
                reachable,
                allocated: self.nodes.len(),
            });
        }

        let mut previous = self.first();
        let mut rank = 1;
        while let Some(before) = previous {
            let Some(after) = self.successor(before) else {
                break;
            };
            rank += 1;
            if self.less.less(self.nodes.get(after).key(), self.nodes.get(before).key()) {
                return Err(InvariantError::OutOfOrder { rank });
            }
            previous = Some(after);
        }

        Ok(())
    }

    /// Returns the verified `(height, weight)` of the subtree at `handle`.
    fn verify_subtree(&self, handle: Handle) -> Result<(usize, usize), InvariantError> {
        let node = self.nodes.get(handle);
        let mut heights = [0; 2];
        let mut weights = [0; 2];

        for (slot, child) in [node.left(), node.right()].into_iter().enumerate() {
            let Some(child) = child else {
                continue;
            };
            let found = self.nodes.get(child).parent();
            if found != Some(handle) {
                return Err(InvariantError::ParentMismatch {
                    node: child.slot(),
                    expected: Some(handle.slot()),
                    found: found.map(Handle::slot),
                });
            }
            (heights[slot], weights[slot]) = self.verify_subtree(child)?;
        }

        let height = 1 + max(heights[0], heights[1]);
        if node.height() != height {
            return Err(InvariantError::HeightMismatch {
                node: handle.slot(),
                stored: node.height(),
                computed: height,
            });
        }

        let weight = 1 + weights[0] + weights[1];
        if node.weight() != weight {
            return Err(InvariantError::WeightMismatch {
                node: handle.slot(),
                stored: node.weight(),
                computed: weight,
            });
        }

        if heights[0].abs_diff(heights[1]) > 1 {
            return Err(InvariantError::Unbalanced {
                node: handle.slot(),
                left_height: heights[0],
                right_height: heights[1],
            });
        }

        Ok((height, weight))
    }
}

impl<K, A: Default + PartialEq, C> RawAvlTree<K, A, C> {
    /// Checks every stored augmentation value against a fresh hook run.
    pub(crate) fn verify_aggregates(&self) -> Result<(), InvariantError> {
        if self.hooks.is_empty() {
            return Ok(());
        }
        for (handle, node) in self.nodes.iter() {
            if *node.aug() != self.compute_aug(handle) {
                return Err(InvariantError::StaleAggregate {
                    node: handle.slot(),
                });
            }
        }
        Ok(())
    }
}

impl<K: Clone, A: Clone, C: Clone> Clone for RawAvlTree<K, A, C> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            less: self.less.clone(),
            hooks: self.hooks.clone(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compare::NaturalOrder;
    use alloc::vec;
    use proptest::prelude::*;

    type Tree = RawAvlTree<i32, (), NaturalOrder>;
    type SumTree = RawAvlTree<i32, i64, NaturalOrder>;

    fn tree() -> Tree {
        RawAvlTree::new(NaturalOrder, Vec::new(), 0)
    }

    fn sum_tree() -> SumTree {
        let sum: SharedHook<i32, i64> = Arc::new(|sum: &mut i64, node: Children<'_, i32, i64>| {
            *sum = node.left().copied().unwrap_or(0) + i64::from(*node.key()) + node.right().copied().unwrap_or(0);
        });
        RawAvlTree::new(NaturalOrder, vec![sum], 0)
    }

    impl<K, A: Default, C: Less<K>> RawAvlTree<K, A, C> {
        fn validate_invariants(&self) {
            if let Err(error) = self.verify() {
                panic!("tree invariant violated: {error}");
            }
        }

        fn keys(&self) -> Vec<&K> {
            let mut keys = Vec::with_capacity(self.len());
            let mut current = self.first();
            while let Some(handle) = current {
                keys.push(self.node(handle).key());
                current = self.successor(handle);
            }
            keys
        }

        fn predecessor(&self, handle: Handle) -> Option<Handle> {
            step(&self.nodes, handle, Side::Left)
        }

        fn key_at(&self, handle: Option<Handle>) -> Option<&K> {
            handle.map(|handle| self.node(handle).key())
        }
    }

    /// Key of the root and its two children, for checking rotation shapes.
    fn top_three(tree: &Tree) -> (Option<i32>, Option<i32>, Option<i32>) {
        let root = tree.root().map(|root| tree.node(root));
        (
            root.map(|node| *node.key()),
            root.and_then(|node| tree.key_at(node.left())).copied(),
            root.and_then(|node| tree.key_at(node.right())).copied(),
        )
    }

    #[test]
    fn single_rotations() {
        let mut right_heavy = tree();
        for key in [1, 2, 3] {
            right_heavy.insert(key, false).unwrap();
        }
        assert_eq!(top_three(&right_heavy), (Some(2), Some(1), Some(3)));

        let mut left_heavy = tree();
        for key in [3, 2, 1] {
            left_heavy.insert(key, false).unwrap();
        }
        assert_eq!(top_three(&left_heavy), (Some(2), Some(1), Some(3)));
        left_heavy.validate_invariants();
    }

    #[test]
    fn double_rotations() {
        let mut left_right = tree();
        for key in [3, 1, 2] {
            left_right.insert(key, false).unwrap();
        }
        assert_eq!(top_three(&left_right), (Some(2), Some(1), Some(3)));

        let mut right_left = tree();
        for key in [1, 3, 2] {
            right_left.insert(key, false).unwrap();
        }
        assert_eq!(top_three(&right_left), (Some(2), Some(1), Some(3)));
        right_left.validate_invariants();
    }

    #[test]
    fn duplicate_insert_hands_key_back() {
        let mut tree = tree();
        let first = tree.insert(7, false).unwrap();
        assert_eq!(tree.insert(7, false), Err(7));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.find(&7), Some(first));
    }

    #[test]
    fn multi_insert_keeps_insertion_order() {
        let mut tree = tree();
        let handles: Vec<Handle> = (0..5).map(|_| tree.insert(4, true).unwrap()).collect();
        tree.validate_invariants();

        let mut in_order = Vec::new();
        let mut current = tree.first();
        while let Some(handle) = current {
            in_order.push(handle);
            current = tree.successor(handle);
        }
        assert_eq!(in_order, handles);
        assert_eq!(tree.find(&4), Some(handles[0]));
    }

    #[test]
    fn remove_two_child_node_keeps_handle_with_successor_key() {
        let mut tree = tree();
        for key in [20, 10, 30, 25, 40] {
            tree.insert(key, false).unwrap();
        }
        let root = tree.root().unwrap();
        assert_eq!(*tree.node(root).key(), 20);

        assert_eq!(tree.remove(root), 20);
        tree.validate_invariants();
        assert_eq!(tree.node(root).key(), &25);
        assert_eq!(tree.keys(), [&10, &25, &30, &40]);
    }

    #[test]
    fn removal_rebalances_above_first_rotation() {
        // Deleting from the short side of a minimal AVL tree.
        let mut tree = tree();
        for key in [8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1] {
            tree.insert(key, false).unwrap();
        }
        tree.validate_invariants();

        let twelve = tree.find(&12).unwrap();
        tree.remove(twelve);
        tree.validate_invariants();
        assert_eq!(tree.keys(), [&1, &2, &3, &4, &5, &6, &7, &8, &9, &10, &11]);
    }

    #[test]
    fn bounds_on_multiset() {
        let mut tree = tree();
        for key in [4, 9, 2, 5, 4, 2, 1, 2, 3, 2, 1, 7, 3, 2] {
            tree.insert(key, true).unwrap();
        }
        tree.validate_invariants();

        let lower = tree.lower_bound(&2).unwrap();
        assert_eq!(tree.rank_of_handle(lower), 3);
        let upper = tree.upper_bound(&2).unwrap();
        assert_eq!(tree.rank_of_handle(upper), 8);
        assert_eq!(tree.key_at(tree.predecessor(upper)), Some(&2));
        assert_eq!(tree.upper_bound(&9), None);
        assert_eq!(tree.key_at(tree.lower_bound(&0)), Some(&1));
    }

    #[test]
    fn pre_order_visits_parent_first() {
        let mut tree = tree();
        for key in [2, 1, 3] {
            tree.insert(key, false).unwrap();
        }
        let mut seen: Vec<&i32> = Vec::new();
        tree.pre_order(|_, node| seen.push(node.key()));
        assert_eq!(seen, [&2, &1, &3]);
    }

    #[test]
    fn empty_tree_queries() {
        let tree = tree();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.by_rank(1), None);
        assert_eq!(tree.lower_bound(&0), None);
        tree.validate_invariants();
    }

    #[test]
    fn verify_reports_corrupted_weight() {
        let mut tree = tree();
        for key in 0..10 {
            tree.insert(key, false).unwrap();
        }
        let root = tree.root().unwrap();
        tree.nodes.get_mut(root).weight = Weight::ONE;
        assert!(matches!(tree.verify(), Err(InvariantError::WeightMismatch { .. })));
    }

    #[test]
    fn verify_reports_stale_aggregate() {
        let mut tree = sum_tree();
        for key in 0..10 {
            tree.insert(key, false).unwrap();
        }
        assert_eq!(tree.verify_aggregates(), Ok(()));
        let root = tree.root().unwrap();
        tree.nodes.get_mut(root).aug = -1;
        assert_eq!(
            tree.verify_aggregates(),
            Err(InvariantError::StaleAggregate { node: root.slot() })
        );
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        InsertMulti(i32),
        Remove(i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0i32..500).prop_map(Op::Insert),
            1 => (0i32..500).prop_map(Op::InsertMulti),
            2 => (0i32..500).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut tree = sum_tree();
            let mut model: Vec<i32> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        let inserted = tree.insert(key, false).is_ok();
                        prop_assert_eq!(inserted, !model.contains(&key));
                        if inserted {
                            model.push(key);
                        }
                    }
                    Op::InsertMulti(key) => {
                        tree.insert(key, true).unwrap();
                        model.push(key);
                    }
                    Op::Remove(key) => {
                        let removed = tree.find(&key).map(|handle| tree.remove(handle));
                        let position = model.iter().position(|&k| k == key);
                        prop_assert_eq!(removed, position.map(|index| model.swap_remove(index)));
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.verify_aggregates(), Ok(()));
            }

            model.sort_unstable();
            prop_assert_eq!(tree.keys(), model.iter().collect::<Vec<_>>());
            let total: i64 = model.iter().map(|&k| i64::from(k)).sum();
            prop_assert_eq!(tree.root().map_or(0, |root| *tree.node(root).aug()), total);
        }

        #[test]
        fn rank_and_by_rank_agree(keys in prop::collection::vec(0i32..1000, 1..300)) {
            let mut tree = tree();
            for key in keys {
                let _ = tree.insert(key, true);
            }

            for rank in 1..=tree.len() {
                let handle = tree.by_rank(rank).unwrap();
                prop_assert_eq!(tree.rank_of_handle(handle), rank);
            }
            prop_assert_eq!(tree.by_rank(0), None);
            prop_assert_eq!(tree.by_rank(tree.len() + 1), None);
        }

        #[test]
        fn height_stays_logarithmic(count in 1usize..2000) {
            let mut tree = tree();
            for key in 0..count as i32 {
                tree.insert(key, false).unwrap();
            }
            // AVL height is below 1.4405 * log2(n + 2).
            let bound = 3 * ((count + 2).ilog2() as usize + 1) / 2;
            prop_assert!(tree.height() <= bound, "height {} over {}", tree.height(), bound);
        }
    }
}
