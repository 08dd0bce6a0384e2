//! Structural mutation.
//!
//! Everything funnels through [`Document::insert`], the splice-style
//! primitive that enforces the tree invariants: no cycles, at most one
//! doctype per document-level parent, and at most one `HEAD` and one
//! `BODY`/`FRAMESET` directly under the document element. Requests that
//! would break an invariant are refused as silent no-ops, mirroring
//! <https://dom.spec.whatwg.org/#mutation-algorithms> only loosely; the
//! convenience wrappers follow the DOM method shapes.

use crate::document::Document;
use crate::node::{NodeId, NodeKind};

/// An item accepted by the batch insertion wrappers. Strings are coerced to
/// text nodes at insertion time.
#[derive(Debug, Clone)]
pub enum NewChild {
    /// An existing node of the same document.
    Node(NodeId),
    /// Text to wrap in a new text node.
    Text(String),
}

impl From<NodeId> for NewChild {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<&str> for NewChild {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for NewChild {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl Document {
    fn is_insertable_parent(&self, parent: NodeId) -> bool {
        match self.kind(parent) {
            NodeKind::Element => !self
                .tag_name(parent)
                .is_some_and(wombat_common::tags::is_void_element),
            NodeKind::Document | NodeKind::DocumentFragment => true,
            _ => false,
        }
    }

    fn is_self_or_ancestor(&self, node: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(c) = current {
            if c == node {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    /// Returns `true` when `parent` is the root of its own tree and can
    /// track a doctype slot.
    fn is_doctype_parent(&self, parent: NodeId) -> bool {
        self.parent(parent).is_none()
            && matches!(
                self.kind(parent),
                NodeKind::Document | NodeKind::DocumentFragment
            )
    }

    fn existing_doctype_under(&self, parent: NodeId) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.kind(c) == NodeKind::DocumentType)
    }

    fn detach_from_parent(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            self.node_mut(parent).children.retain(|&c| c != node);
            self.node_mut(node).parent = None;
        }
    }

    /// Detaches every child of `parent`, leaving the nodes in the arena.
    pub fn detach_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.node_mut(parent).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
        self.refresh_caches();
    }

    fn splice_one(&mut self, parent: NodeId, node: NodeId, index: usize, replace_count: usize) {
        self.detach_from_parent(node);
        let len = self.node(parent).children.len();
        let at = index.min(len);
        let end = (at + replace_count).min(len);
        let removed: Vec<NodeId> = self
            .node_mut(parent)
            .children
            .splice(at..end, std::iter::once(node))
            .collect();
        for r in removed {
            self.node_mut(r).parent = None;
        }
        self.node_mut(node).parent = Some(parent);
    }

    fn splice_many(&mut self, parent: NodeId, nodes: &[NodeId], index: usize, replace_count: usize) {
        let len = self.node(parent).children.len();
        let at = index.min(len);
        let end = (at + replace_count).min(len);
        let removed: Vec<NodeId> = self
            .node_mut(parent)
            .children
            .splice(at..end, nodes.iter().copied())
            .collect();
        for r in removed {
            if !nodes.contains(&r) {
                self.node_mut(r).parent = None;
            }
        }
        for &n in nodes {
            self.node_mut(n).parent = Some(parent);
        }
    }

    /// The general insertion primitive: splices `node` into `parent`'s
    /// child sequence at `index`, detaching `replace_count` existing
    /// children. A fragment with exactly one child is unwrapped to that
    /// child; a fragment with several children is spliced in as a batch.
    ///
    /// Returns `false` without changing the tree when the request violates
    /// an invariant: the parent cannot hold children, the insertion would
    /// create a cycle, or a second doctype/`HEAD`/`BODY`/`FRAMESET` would
    /// land in a slot that already has one outside the replaced range.
    pub fn insert(
        &mut self,
        parent: NodeId,
        node: NodeId,
        index: usize,
        replace_count: usize,
    ) -> bool {
        if !self.is_insertable_parent(parent) {
            return false;
        }
        let len = self.node(parent).children.len();
        let at = index.min(len);
        let replaced: Vec<NodeId> =
            self.node(parent).children[at..(at + replace_count).min(len)].to_vec();

        let mut node = node;
        if self.kind(node) == NodeKind::DocumentFragment && self.children(node).len() == 1 {
            node = self.children(node)[0];
        }

        match self.kind(node) {
            NodeKind::Element
            | NodeKind::Text
            | NodeKind::CdataSection
            | NodeKind::ProcessingInstruction
            | NodeKind::Comment => {
                if self.is_self_or_ancestor(node, parent) {
                    return false;
                }
                // Duplicate HEAD/BODY/FRAMESET directly under the document
                // element of a promoted document.
                if self.parent(parent) == Some(Self::ROOT)
                    && self.kind(Self::ROOT) == NodeKind::Document
                    && let Some(tag) = self.tag_name(node)
                {
                    let slot = match tag {
                        "HEAD" => Some(self.head()),
                        "BODY" | "FRAMESET" => Some(self.body()),
                        _ => None,
                    };
                    if let Some(Some(current)) = slot
                        && !replaced.contains(&current)
                    {
                        return false;
                    }
                }
                self.splice_one(parent, node, index, replace_count);
            }

            NodeKind::DocumentType => {
                if !matches!(
                    self.kind(parent),
                    NodeKind::Document | NodeKind::DocumentFragment
                ) {
                    return false;
                }
                if let Some(current) = self.existing_doctype_under(parent)
                    && current != node
                    && !replaced.contains(&current)
                {
                    return false;
                }
                self.splice_one(parent, node, index, replace_count);
            }

            NodeKind::DocumentFragment => {
                // A fragment must not land inside its own subtree.
                if node == Self::ROOT || self.is_self_or_ancestor(node, parent) {
                    return false;
                }
                let to_insert = self.classify_fragment_children(parent, node, &replaced);
                if to_insert.is_empty() {
                    return false;
                }
                self.node_mut(node)
                    .children
                    .retain(|c| !to_insert.contains(c));
                self.splice_many(parent, &to_insert, index, replace_count);
            }

            NodeKind::Document => return false,
        }

        self.refresh_caches();
        true
    }

    /// Selects which children of a multi-child fragment are admitted into
    /// `parent`, applying the duplicate-singleton rules. Rejected children
    /// stay in the fragment.
    fn classify_fragment_children(
        &self,
        parent: NodeId,
        fragment: NodeId,
        replaced: &[NodeId],
    ) -> Vec<NodeId> {
        let mut to_insert = Vec::new();
        let at_document_element_level = self.parent(parent) == Some(Self::ROOT)
            && self.kind(Self::ROOT) == NodeKind::Document;

        if at_document_element_level {
            let mut head_taken = false;
            let mut body_taken = false;
            for &child in self.children(fragment) {
                match self.kind(child) {
                    NodeKind::Element
                    | NodeKind::Text
                    | NodeKind::CdataSection
                    | NodeKind::ProcessingInstruction
                    | NodeKind::Comment => {}
                    _ => continue,
                }
                match self.tag_name(child) {
                    Some("HEAD") => {
                        let occupied = self
                            .head()
                            .is_some_and(|current| !replaced.contains(&current));
                        if head_taken || occupied {
                            continue;
                        }
                        head_taken = true;
                    }
                    Some("BODY" | "FRAMESET") => {
                        let occupied = self
                            .body()
                            .is_some_and(|current| !replaced.contains(&current));
                        if body_taken || occupied {
                            continue;
                        }
                        body_taken = true;
                    }
                    _ => {}
                }
                to_insert.push(child);
            }
        } else {
            let mut doctype_taken = false;
            let doctype_ok = self.is_doctype_parent(parent);
            for &child in self.children(fragment) {
                if self.kind(child) == NodeKind::DocumentType {
                    let occupied = self
                        .existing_doctype_under(parent)
                        .is_some_and(|current| !replaced.contains(&current));
                    if doctype_taken || !doctype_ok || occupied {
                        continue;
                    }
                    doctype_taken = true;
                }
                to_insert.push(child);
            }
        }
        to_insert
    }

    // ========== DOM-style wrappers ==========

    /// Appends `node` as the last child of `parent`. Returns the node on
    /// success.
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Option<NodeId> {
        self.insert_before(parent, node, None)
    }

    /// Inserts `node` before `reference` under `parent`, or at the end when
    /// `reference` is `None`. Returns the node on success.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Option<NodeId> {
        if !self.kind(parent).is_container() {
            return None;
        }
        let idx = match reference {
            None => self.children(parent).len(),
            Some(r) => {
                if self.parent(r) != Some(parent) {
                    return None;
                }
                self.children(parent).iter().position(|&c| c == r)?
            }
        };
        self.insert(parent, node, idx, 0).then_some(node)
    }

    /// Replaces `old` with `new_node` under `parent`. Returns the replaced
    /// node when the arguments were coherent, even if the insertion itself
    /// was refused.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_node: NodeId,
        old: NodeId,
    ) -> Option<NodeId> {
        if !self.kind(parent).is_container()
            || self.parent(old) != Some(parent)
            || old == new_node
        {
            return None;
        }
        let idx = self.children(parent).iter().position(|&c| c == old)?;
        let _ = self.insert(parent, new_node, idx, 1);
        Some(old)
    }

    /// Detaches `child` from `parent`. Returns the child on success.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        if self.parent(child) != Some(parent) {
            return None;
        }
        self.node_mut(parent).children.retain(|&c| c != child);
        self.node_mut(child).parent = None;
        self.refresh_caches();
        Some(child)
    }

    /// Detaches the node from its parent, if it has one.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            let _ = self.remove_child(parent, node);
        }
    }

    fn insert_nodes(&mut self, parent: NodeId, nodes: &[NewChild], index: usize) {
        let mut idx = index;
        for item in nodes {
            let node = match item {
                NewChild::Node(id) => *id,
                NewChild::Text(text) => self.create_text_node(text),
            };
            let _ = self.insert(parent, node, idx, 0);
            idx += 1;
        }
    }

    /// Inserts `nodes` at the front of `parent`'s children, after the
    /// doctype when `parent` is the document root.
    pub fn prepend(&mut self, parent: NodeId, nodes: &[NewChild]) {
        if !self.kind(parent).is_container() || nodes.is_empty() {
            return;
        }
        let mut idx = 0;
        if parent == Self::ROOT
            && let Some(dt) = self.doctype()
            && let Some(pos) = self.children(parent).iter().position(|&c| c == dt)
        {
            idx = pos + 1;
        }
        self.insert_nodes(parent, nodes, idx);
    }

    /// Appends `nodes` to the end of `parent`'s children.
    pub fn append(&mut self, parent: NodeId, nodes: &[NewChild]) {
        if !self.kind(parent).is_container() || nodes.is_empty() {
            return;
        }
        self.insert_nodes(parent, nodes, self.children(parent).len());
    }

    /// Detaches all of `parent`'s children, then inserts `nodes`.
    pub fn replace_children(&mut self, parent: NodeId, nodes: &[NewChild]) {
        if !self.kind(parent).is_container() {
            return;
        }
        self.detach_children(parent);
        if !nodes.is_empty() {
            self.insert_nodes(parent, nodes, 0);
        }
    }

    /// Inserts `nodes` immediately before this node under its parent.
    /// Doctype nodes delegate to [`Self::after`] so nothing lands in front
    /// of the doctype.
    pub fn before(&mut self, node: NodeId, nodes: &[NewChild]) {
        if self.kind(node) == NodeKind::DocumentType {
            self.after(node, nodes);
            return;
        }
        if let Some(parent) = self.parent(node)
            && let Some(idx) = self.children(parent).iter().position(|&c| c == node)
        {
            self.insert_nodes(parent, nodes, idx);
        }
    }

    /// Inserts `nodes` immediately after this node under its parent.
    pub fn after(&mut self, node: NodeId, nodes: &[NewChild]) {
        if let Some(parent) = self.parent(node)
            && let Some(idx) = self.children(parent).iter().position(|&c| c == node)
        {
            self.insert_nodes(parent, nodes, idx + 1);
        }
    }

    /// Detaches this node and inserts `nodes` at its former position.
    pub fn replace_with(&mut self, node: NodeId, nodes: &[NewChild]) {
        if let Some(parent) = self.parent(node)
            && let Some(idx) = self.children(parent).iter().position(|&c| c == node)
        {
            let _ = self.remove_child(parent, node);
            self.insert_nodes(parent, nodes, idx);
        }
    }
}
