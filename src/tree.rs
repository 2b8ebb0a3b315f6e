//! Rooted multi-way tree over a slotmap arena.

use slotmap::{DefaultKey, SlotMap};

use crate::error::{Error, Result};

/// Stable handle to a node in a [`Tree`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TreeNodeRef(DefaultKey);

#[derive(Debug)]
struct TreeNode<T> {
    value: T,
    children: Vec<DefaultKey>,
}

/// A rooted tree where every node may have any number of children.
#[derive(Debug)]
pub struct Tree<T> {
    nodes: SlotMap<DefaultKey, TreeNode<T>>,
    root: DefaultKey,
}

impl<T> Tree<T> {
    /// A tree with a single root node holding `root_value`.
    pub fn new(root_value: T) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(TreeNode {
            value: root_value,
            children: Vec::new(),
        });
        Self { nodes, root }
    }

    pub fn root(&self) -> TreeNodeRef {
        TreeNodeRef(self.root)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // A tree always has a root.
        false
    }

    pub fn value(&self, node: TreeNodeRef) -> Option<&T> {
        self.nodes.get(node.0).map(|n| &n.value)
    }

    pub fn value_mut(&mut self, node: TreeNodeRef) -> Option<&mut T> {
        self.nodes.get_mut(node.0).map(|n| &mut n.value)
    }

    /// Appends a new child under `parent` and returns its handle.
    ///
    /// Fails with [`Error::NodeNotFound`] when `parent` does not resolve.
    pub fn add_child(&mut self, parent: TreeNodeRef, value: T) -> Result<TreeNodeRef> {
        if !self.nodes.contains_key(parent.0) {
            return Err(Error::NodeNotFound);
        }
        let child = self.nodes.insert(TreeNode {
            value,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(child);
        Ok(TreeNodeRef(child))
    }

    /// Child handles of `node`, in insertion order.
    pub fn children(&self, node: TreeNodeRef) -> Vec<TreeNodeRef> {
        self.nodes
            .get(node.0)
            .map(|n| n.children.iter().copied().map(TreeNodeRef).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_holds_initial_value() {
        let tree = Tree::new("root");
        assert_eq!(tree.value(tree.root()), Some(&"root"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn children_are_kept_in_insertion_order() {
        let mut tree = Tree::new(0);
        let a = tree.add_child(tree.root(), 1).unwrap();
        let b = tree.add_child(tree.root(), 2).unwrap();
        tree.add_child(a, 3).unwrap();

        let children = tree.children(tree.root());
        assert_eq!(children, vec![a, b]);
        assert_eq!(tree.value(a), Some(&1));
        assert_eq!(tree.children(a).len(), 1);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn add_child_under_foreign_handle_fails() {
        let other = Tree::new(0);
        let extra = {
            let mut t = Tree::new(0);
            // Grow the arena so the handle's slot does not exist in `other`.
            let c1 = t.add_child(t.root(), 1).unwrap();
            t.add_child(c1, 2).unwrap()
        };
        let mut tree = other;
        assert_eq!(tree.add_child(extra, 9), Err(Error::NodeNotFound));
    }

    #[test]
    fn value_mut_updates_in_place() {
        let mut tree = Tree::new(1);
        *tree.value_mut(tree.root()).unwrap() += 41;
        assert_eq!(tree.value(tree.root()), Some(&42));
    }
}
