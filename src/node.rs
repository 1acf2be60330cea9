use smallvec::SmallVec;

use crate::arena::NodeId;
use crate::Value;

/// Children keyed by the first char of their label, kept sorted.
pub(crate) type Children = SmallVec<[(char, NodeId); 4]>;

/// A node in the radix trie.
///
/// - `label` is the edge from the parent to this node. Only the root has an
///   empty label.
/// - `value` is set iff the path from the root to this node spells a stored key.
/// - `children` never holds two entries with the same first char.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) label: String,
    pub(crate) value: Option<Value>,
    pub(crate) children: Children,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            label: String::new(),
            value: None,
            children: SmallVec::new(),
        }
    }

    pub(crate) fn leaf(label: &str, value: Value) -> Self {
        debug_assert!(!label.is_empty());
        Self {
            label: label.to_owned(),
            value: Some(value),
            children: SmallVec::new(),
        }
    }

    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub(crate) fn first_char(&self) -> Option<char> {
        self.label.chars().next()
    }

    /// Finds the child whose label starts with `c`.
    #[inline]
    pub(crate) fn child(&self, c: char) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&c, |&(first, _)| first)
            .ok()
            .map(|pos| self.children[pos].1)
    }

    /// Adds a child, keeping the list sorted by first char.
    pub(crate) fn add_child(&mut self, c: char, id: NodeId) {
        match self.children.binary_search_by_key(&c, |&(first, _)| first) {
            // Callers look the char up first; two siblings never share it.
            Ok(pos) => self.children[pos] = (c, id),
            Err(pos) => self.children.insert(pos, (c, id)),
        }
    }

    pub(crate) fn remove_child(&mut self, c: char) -> Option<NodeId> {
        let pos = self
            .children
            .binary_search_by_key(&c, |&(first, _)| first)
            .ok()?;
        Some(self.children.remove(pos).1)
    }

    /// The sole child, if there is exactly one.
    #[inline]
    pub(crate) fn only_child(&self) -> Option<NodeId> {
        match self.children.as_slice() {
            [(_, id)] => Some(*id),
            _ => None,
        }
    }
}

/// Byte length of the longest common prefix of `a` and `b`, always on a char
/// boundary of both.
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|&((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// First char of a non-empty key suffix.
#[inline]
pub(crate) fn head(s: &str) -> Option<char> {
    s.chars().next()
}
