use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write};

use super::AvlTree;
use crate::raw::{Handle, Node};

impl<K, A, C> AvlTree<K, A, C> {
    /// Lists every parent-to-child link as a pair of keys, in pre-order.
    ///
    /// A left link of a node is listed before its right link, and a node's links
    /// before its descendants'. Together with [`root`](AvlTree::root) this pins down
    /// the shape of the tree exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from([1, 2, 3, 4]);
    /// assert_eq!(tree.edges(), [(&2, &1), (&2, &3), (&3, &4)]);
    /// ```
    #[must_use]
    pub fn edges(&self) -> Vec<(&K, &K)> {
        let mut edges = Vec::with_capacity(self.len().saturating_sub(1));
        self.raw.pre_order(|_, node| {
            for child in [node.left(), node.right()].into_iter().flatten() {
                edges.push((node.key(), self.raw.node(child).key()));
            }
        });
        edges
    }

    /// Returns a [`Display`](fmt::Display) adapter that renders the tree in Graphviz
    /// DOT syntax.
    ///
    /// Each node is labeled with its key, height and weight, and identified by its
    /// slot number (the `node` field of an [`InvariantError`](crate::InvariantError)).
    #[must_use]
    pub fn graphviz(&self) -> Graphviz<'_, K, A, C> {
        Graphviz { tree: self }
    }

    /// Renders the tree in Graphviz DOT syntax.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from(["b", "a"]);
    /// let dot = tree.to_graphviz();
    /// assert!(dot.starts_with("digraph avl {"));
    /// assert!(dot.contains(r#"n0 [label="\"b\"\nh=2 w=2"];"#));
    /// assert!(dot.contains("n0 -> n1 [label=L];"));
    /// ```
    #[must_use]
    pub fn to_graphviz(&self) -> String
    where
        K: fmt::Debug,
    {
        self.graphviz().to_string()
    }
}

/// Graphviz rendering of an [`AvlTree`], created by [`AvlTree::graphviz`].
pub struct Graphviz<'a, K, A, C> {
    tree: &'a AvlTree<K, A, C>,
}

impl<K: fmt::Debug, A, C> fmt::Display for Graphviz<'_, K, A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph avl {{")?;
        writeln!(f, "    node [shape=box];")?;
        let mut result = Ok(());
        self.tree.raw.pre_order(|handle, node| {
            if result.is_ok() {
                result = write_node(f, handle, node);
            }
        });
        result?;
        writeln!(f, "}}")
    }
}

fn write_node<K: fmt::Debug, A>(f: &mut fmt::Formatter<'_>, handle: Handle, node: &Node<K, A>) -> fmt::Result {
    let id = handle.slot();
    write!(f, "    n{id} [label=\"")?;
    write!(Escaped(f), "{:?}", node.key())?;
    writeln!(f, "\\nh={} w={}\"];", node.height(), node.weight())?;
    for (label, child) in [("L", node.left()), ("R", node.right())] {
        if let Some(child) = child {
            writeln!(f, "    n{id} -> n{} [label={label}];", child.slot())?;
        }
    }
    Ok(())
}

impl<K, A, C> fmt::Debug for Graphviz<'_, K, A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graphviz").field("len", &self.tree.len()).finish()
    }
}

/// Escapes DOT string-literal metacharacters on their way into the formatter.
struct Escaped<'a, 'b>(&'a mut fmt::Formatter<'b>);

impl Write for Escaped<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            match c {
                '"' | '\\' => {
                    self.0.write_char('\\')?;
                    self.0.write_char(c)?;
                }
                '\n' => self.0.write_str("\\n")?,
                _ => self.0.write_char(c)?,
            }
        }
        Ok(())
    }
}
