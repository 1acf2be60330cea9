//! Prefix completion.

use tracing::trace;

use crate::arena::NodeId;
use crate::node::{common_prefix_len, head};
use crate::table::SymbolTable;
use crate::LOG_TARGET;

impl SymbolTable {
    /// Extends `buf` with the continuation shared by every stored key that
    /// starts with it.
    ///
    /// Returns `true` if `buf` was extended. Nothing changes when `buf`
    /// already ends on a node boundary (a stored key, or a point where keys
    /// branch), or when no stored key starts with `buf`.
    ///
    /// ```rust
    /// use radix_symtab::SymbolTable;
    ///
    /// let mut table = SymbolTable::new();
    /// table.put("hello", 1).unwrap();
    /// table.put("help", 2).unwrap();
    ///
    /// let mut buf = String::from("he");
    /// assert!(table.complete(&mut buf));
    /// assert_eq!(buf, "hel");
    /// assert!(!table.complete(&mut buf));
    /// ```
    pub fn complete(&self, buf: &mut String) -> bool {
        let mut id = NodeId::ROOT;
        let mut matched = 0;

        loop {
            let node = self.nodes.get(id);
            let rest = &buf[matched..];
            let common = common_prefix_len(&node.label, rest);

            if common == node.label.len() {
                matched += common;
                let Some(first) = head(&buf[matched..]) else {
                    return false;
                };
                match node.child(first) {
                    Some(child) => id = child,
                    None => return false,
                }
            } else if common == rest.len() {
                // A non-root node without a value has at least two children,
                // so the rest of this label is shared by every key below it.
                let tail = &node.label[common..];
                trace!(target: LOG_TARGET, prefix = %buf, tail, "Completed prefix");
                buf.push_str(tail);
                return true;
            } else {
                return false;
            }
        }
    }
}
