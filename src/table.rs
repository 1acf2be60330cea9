//! Insert, lookup and removal on the compressed trie.
//!
//! Shape invariants maintained here:
//! - sibling labels differ in their first char;
//! - apart from the root, a node without a value never has exactly one child
//!   (removal merges it with that child);
//! - only the root has an empty label, and the root never holds a value.

use tracing::{debug, trace};

use crate::arena::{NodeArena, NodeId};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::node::{common_prefix_len, head, Node};
use crate::{Value, LOG_TARGET};

/// A symbol table mapping non-empty string keys to non-zero integers.
///
/// Backed by a radix trie whose nodes live in an index arena. Dropping the
/// table releases every node.
#[derive(Clone)]
pub struct SymbolTable {
    pub(crate) nodes: NodeArena,
    pub(crate) len: usize,
}

impl SymbolTable {
    /// Creates an empty table with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty table with room for `capacity` nodes before the arena
    /// reallocates. A hint too large to reserve is ignored.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config::new().initial_capacity(capacity))
    }

    /// Creates an empty table with the given configuration.
    pub fn with_config(config: Config) -> Self {
        let mut nodes = NodeArena::with_capacity(config.initial_capacity.max(1));
        let root = nodes.alloc(Node::root());
        debug_assert_eq!(root, NodeId::ROOT);
        debug!(target: LOG_TARGET, capacity = config.initial_capacity, "Created symbol table");
        Self { nodes, len: 0 }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live trie nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.live()
    }

    /// Number of nodes the arena holds before it has to grow.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Removes every key, leaving a table equivalent to a freshly created one.
    pub fn clear(&mut self) {
        debug!(target: LOG_TARGET, keys = self.len, nodes = self.nodes.live(), "Clearing symbol table");
        self.nodes.clear();
        self.nodes.alloc(Node::root());
        self.len = 0;
    }

    /// Stores `value` under `key`, returning the value it replaces.
    ///
    /// Fails with [`Error::ZeroValue`] if `value` is 0 and with
    /// [`Error::EmptyKey`] if `key` is empty. The table is untouched on error.
    pub fn put(&mut self, key: &str, value: i32) -> Result<Option<Value>> {
        let value = Value::new(value).ok_or(Error::ZeroValue)?;
        self.insert(key, value)
    }

    /// Stores `value` under `key`, returning the value it replaces.
    ///
    /// Fails with [`Error::EmptyKey`] if `key` is empty.
    pub fn insert(&mut self, key: &str, value: Value) -> Result<Option<Value>> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }

        let mut id = NodeId::ROOT;
        let mut rest = key;

        loop {
            let node = self.nodes.get(id);
            let label_len = node.label.len();
            let common = common_prefix_len(&node.label, rest);

            if common < label_len {
                // Children are dispatched on their first char, so only the
                // root could diverge at 0, and its label is empty.
                debug_assert!(common > 0);
                self.split(id, common);
                rest = &rest[common..];
                match head(rest) {
                    None => self.nodes.get_mut(id).value = Some(value),
                    Some(first) => {
                        let leaf = self.nodes.alloc(Node::leaf(rest, value));
                        self.nodes.get_mut(id).add_child(first, leaf);
                        trace!(target: LOG_TARGET, key, suffix = rest, "Added leaf under split");
                    }
                }
                self.len += 1;
                return Ok(None);
            }

            rest = &rest[label_len..];
            let Some(first) = head(rest) else {
                let old = self.nodes.get_mut(id).value.replace(value);
                if old.is_none() {
                    self.len += 1;
                }
                return Ok(old);
            };

            match node.child(first) {
                Some(child) => id = child,
                None => {
                    let leaf = self.nodes.alloc(Node::leaf(rest, value));
                    self.nodes.get_mut(id).add_child(first, leaf);
                    trace!(target: LOG_TARGET, key, suffix = rest, "Appended leaf");
                    self.len += 1;
                    return Ok(None);
                }
            }
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.find(key).and_then(|id| self.nodes.get(id).value)
    }

    /// Returns true if `key` is stored.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning the value it held.
    ///
    /// A node that still branches toward longer keys only loses its value.
    /// Whichever node ends up without a value and with a single child is
    /// merged with that child.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let mut parent = None;
        let mut id = NodeId::ROOT;
        let mut rest = key;

        loop {
            let node = self.nodes.get(id);
            rest = rest.strip_prefix(node.label.as_str())?;
            let Some(first) = head(rest) else { break };
            let child = node.child(first)?;
            parent = Some(id);
            id = child;
        }

        let node = self.nodes.get_mut(id);
        let old = node.value.take()?;
        self.len -= 1;

        // The root never holds a value, so a terminal always has a parent.
        let Some(parent) = parent else {
            return Some(old);
        };

        if node.children.is_empty() {
            if let Some(first) = node.first_char() {
                self.nodes.get_mut(parent).remove_child(first);
            }
            self.nodes.free(id);
            trace!(target: LOG_TARGET, key, "Removed leaf");
        } else if let Some(only) = node.only_child() {
            self.merge(id, only);
        } else {
            trace!(target: LOG_TARGET, key, "Demoted branching node");
        }

        if parent != NodeId::ROOT {
            let p = self.nodes.get(parent);
            if let (false, Some(only)) = (p.is_terminal(), p.only_child()) {
                self.merge(parent, only);
            }
        }

        Some(old)
    }

    /// Walks to the node whose path spells exactly `key`.
    pub(crate) fn find(&self, key: &str) -> Option<NodeId> {
        let mut id = NodeId::ROOT;
        let mut rest = key;
        loop {
            let node = self.nodes.get(id);
            rest = rest.strip_prefix(node.label.as_str())?;
            match head(rest) {
                None => return Some(id),
                Some(first) => id = node.child(first)?,
            }
        }
    }

    /// Cuts the label of `id` at byte offset `at`. The tail moves into a new
    /// child that inherits the value and children; `id` keeps neither.
    fn split(&mut self, id: NodeId, at: usize) {
        let node = self.nodes.get_mut(id);
        let tail = node.label.split_off(at);
        let first = head(&tail);
        let moved = Node {
            label: tail,
            value: node.value.take(),
            children: std::mem::take(&mut node.children),
        };
        trace!(target: LOG_TARGET, prefix = %node.label, tail = %moved.label, "Split node");

        let moved_id = self.nodes.alloc(moved);
        if let Some(first) = first {
            self.nodes.get_mut(id).add_child(first, moved_id);
        }
    }

    /// Absorbs `child`, the sole child of `id`, into `id`.
    fn merge(&mut self, id: NodeId, child: NodeId) {
        let absorbed = self.nodes.free(child);
        let node = self.nodes.get_mut(id);
        node.label.push_str(&absorbed.label);
        node.value = absorbed.value;
        node.children = absorbed.children;
        trace!(target: LOG_TARGET, label = %node.label, "Merged node with its only child");
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
