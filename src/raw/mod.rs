mod arena;
mod handle;
mod navigate;
mod node;
mod raw_avl_tree;
mod weight;

pub(crate) use arena::Arena;
pub(crate) use handle::Handle;
pub(crate) use navigate::{extreme, rank, step};
pub(crate) use node::{Node, Side};
pub(crate) use raw_avl_tree::{RawAvlTree, SharedHook};
