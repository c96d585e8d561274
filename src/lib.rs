//! An order-statistic AVL tree for Rust.
//!
//! This crate provides [`AvlTree`], a balanced binary search tree that answers rank
//! queries in O(log n) alongside the usual ordered-set operations:
//!
//! - [`find_by_rank`](AvlTree::find_by_rank) - Get the key at a given one-based sorted position
//! - [`rank_of`](AvlTree::rank_of) - Get the sorted position of a key
//! - [`lower_bound`](AvlTree::lower_bound) / [`upper_bound`](AvlTree::upper_bound) - First key not less than / greater than a probe
//! - Indexing by [`Rank`] - e.g., `tree[Rank(1)]` for the smallest key
//!
//! # Example
//!
//! ```
//! use avl_ostree::{AvlTree, Rank};
//!
//! let mut tree = AvlTree::new();
//! for key in [100, 200, 50, 20, 10, 1, 2, 3] {
//!     tree.insert(key);
//! }
//!
//! // Ranks are one-based.
//! assert_eq!(tree.find_by_rank(1), Some(&1));
//! assert_eq!(tree.rank_of(&50), Some(6));
//! assert_eq!(tree[Rank(8)], 200);
//!
//! // Node references walk in key order.
//! let fifty = tree.find(&50).unwrap();
//! assert_eq!(fifty.next().map(|node| *node.key()), Some(100));
//! assert_eq!(fifty.prev().map(|node| *node.key()), Some(20));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Custom ordering** - Any strict weak order via [`Less`], including plain closures
//! - **Multisets** - [`insert_multi`](AvlTree::insert_multi) keeps equivalent keys in insertion order
//! - **Augmentation** - [`Hook`]s maintain per-subtree aggregates such as sums or extrema
//! - **Diagnostics** - [`verify`](AvlTree::verify), [`edges`](AvlTree::edges) and Graphviz export
//!
//! # Implementation
//!
//! Nodes live in a slot arena and refer to their children and parent by index, so a
//! node can walk upwards without shared ownership. Each node stores the height and
//! weight (node count) of its subtree; both are recomputed bottom-up on every
//! structural change, together with any hook aggregates.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod rank;
mod raw;

pub mod avl_tree;
pub mod hook;

pub use avl_tree::{AvlTree, Builder, Graphviz, Iter, NodeRef};
pub use compare::{Less, NaturalOrder};
pub use error::InvariantError;
pub use hook::{Children, Hook};
pub use rank::Rank;
