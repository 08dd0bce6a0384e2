//! Mutation-tolerant pre-order traversal.
//!
//! The walk keeps an explicit ancestor/index stack instead of recursing, and
//! captures the next sibling by identity before every visit. When the visit
//! callback restructures the tree, the walk re-resolves its position against
//! the current child list rather than trusting a stale index, so nodes
//! inserted or removed among the visited node's siblings are neither skipped
//! nor visited twice.

use crate::document::Document;
use crate::node::{NodeId, NodeKind};

struct Walk {
    start: NodeId,
    // The node whose child list we are currently indexing.
    list_owner: NodeId,
    idx: usize,
    idx_stack: Vec<usize>,
}

impl Walk {
    fn new(start: NodeId) -> Self {
        Self {
            start,
            list_owner: start,
            idx: 0,
            idx_stack: Vec::new(),
        }
    }

    fn captured_next(&self, doc: &Document) -> Option<NodeId> {
        doc.children(self.list_owner).get(self.idx + 1).copied()
    }

    /// Steps to the node after `current`, given the sibling captured before
    /// the visit callback ran.
    fn next_node(
        &mut self,
        doc: &Document,
        current: NodeId,
        captured_next: Option<NodeId>,
    ) -> Option<NodeId> {
        // Descend only when the callback left the current node in place;
        // a moved or removed node no longer represents this position.
        if doc.parent(current) == Some(self.list_owner) && !doc.children(current).is_empty() {
            self.idx_stack.push(self.idx);
            self.list_owner = current;
            self.idx = 0;
            return Some(doc.children(current)[0]);
        }

        let siblings = doc.children(self.list_owner);
        match captured_next {
            Some(next) => {
                self.idx += 1;
                if siblings.get(self.idx).copied() != Some(next) {
                    // The callback changed the number of nodes before the
                    // captured sibling; find it again by identity. When it
                    // was removed outright, fall back to the position after
                    // the current node.
                    if let Some(pos) = siblings.iter().position(|&c| c == next) {
                        self.idx = pos;
                    } else if let Some(pos) = siblings.iter().position(|&c| c == current) {
                        self.idx = pos + 1;
                    }
                }
            }
            None => self.idx = siblings.len(),
        }

        loop {
            if let Some(&node) = doc.children(self.list_owner).get(self.idx) {
                return Some(node);
            }
            if self.list_owner == self.start {
                return None;
            }
            let grandparent = doc.parent(self.list_owner)?;
            self.idx = self.idx_stack.pop().map_or(0, |i| i + 1);
            self.list_owner = grandparent;
        }
    }
}

impl Document {
    /// Walks the subtree under `start` in pre-order, visiting nodes of the
    /// filtered kind (or every node when `filter` is `None`). The start
    /// node itself is not visited. The visitor returning `false` stops the
    /// walk.
    pub fn for_each<F>(&self, start: NodeId, filter: Option<NodeKind>, mut visit: F)
    where
        F: FnMut(&Self, NodeId) -> bool,
    {
        let Some(mut current) = self.first_child(start) else {
            return;
        };
        let mut walk = Walk::new(start);
        loop {
            let captured_next = walk.captured_next(self);
            if filter.is_none_or(|k| self.kind(current) == k) && !visit(self, current) {
                return;
            }
            match walk.next_node(self, current, captured_next) {
                Some(next) => current = next,
                None => return,
            }
        }
    }

    /// Like [`Self::for_each`], with a visitor that may mutate the document.
    /// Structural changes among the visited node's siblings are tolerated:
    /// the walk re-resolves its position after every visit.
    pub fn for_each_mut<F>(&mut self, start: NodeId, filter: Option<NodeKind>, mut visit: F)
    where
        F: FnMut(&mut Self, NodeId) -> bool,
    {
        let Some(mut current) = self.first_child(start) else {
            return;
        };
        let mut walk = Walk::new(start);
        loop {
            let captured_next = walk.captured_next(self);
            if filter.is_none_or(|k| self.kind(current) == k) && !visit(self, current) {
                return;
            }
            match walk.next_node(self, current, captured_next) {
                Some(next) => current = next,
                None => return,
            }
        }
    }
}
