//! Depth-first widget tree traversal
//!
//! `TreeWalker` yields nodes in pre-order: a node, then its children, then
//! (optionally) its submenu. Expansion of a node is deferred until the next
//! call to `next()`, so the consumer can call [`TreeWalker::skip_children`]
//! on the node it just received and prune that subtree.
//!
//! The input is assumed acyclic; no cycle detection is done.

use super::Locatable;

pub struct TreeWalker<N: Locatable> {
    /// Nodes still to visit, paired with their depth. Top of stack is next.
    pending: Vec<(N, usize)>,
    /// Last yielded node, not yet expanded.
    current: Option<(N, usize)>,
    visit_submenus: bool,
    skip: bool,
}

impl<N: Locatable> TreeWalker<N> {
    pub fn new(root: Option<N>, visit_submenus: bool) -> Self {
        Self {
            pending: root.into_iter().map(|n| (n, 0)).collect(),
            current: None,
            visit_submenus,
            skip: false,
        }
    }

    /// Walk `root` including submenus.
    pub fn all(root: &N) -> Self {
        Self::new(Some(root.clone()), true)
    }

    /// Depth of the most recently yielded node (root = 0).
    pub fn depth(&self) -> usize {
        self.current.as_ref().map(|(_, d)| *d).unwrap_or(0)
    }

    /// Do not descend into the node returned by the last `next()`.
    pub fn skip_children(&mut self) {
        if self.current.is_some() {
            self.skip = true;
        }
    }

    fn expand_current(&mut self) {
        let Some((node, depth)) = self.current.take() else {
            return;
        };
        if std::mem::take(&mut self.skip) {
            return;
        }
        // Pushed in reverse so children pop in order, submenu last.
        if self.visit_submenus {
            if let Some(menu) = node.submenu() {
                self.pending.push((menu, depth + 1));
            }
        }
        let children = node.children();
        self.pending
            .extend(children.into_iter().rev().map(|c| (c, depth + 1)));
    }
}

impl<N: Locatable> Iterator for TreeWalker<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        self.expand_current();
        let (node, depth) = self.pending.pop()?;
        self.current = Some((node.clone(), depth));
        Some(node)
    }
}

impl<N: Locatable> std::iter::FusedIterator for TreeWalker<N> {}
