//! Enumeration of stored keys, optionally restricted to a prefix.
//!
//! Keys come out depth-first, a node before its children and children in
//! ascending order of their first char, which is plain lexicographic order by
//! char. A prefix that ends inside a label still selects that node's subtree.

use crate::arena::NodeId;
use crate::node::{common_prefix_len, head};
use crate::table::SymbolTable;
use crate::Value;

/// Lazy iterator over `(key, value)` pairs sharing a prefix.
///
/// Cloning the iterator saves its position; both copies continue
/// independently.
#[derive(Clone)]
pub struct PrefixIter<'a> {
    table: &'a SymbolTable,
    /// Pending nodes with the key length before their label.
    stack: Vec<(NodeId, usize)>,
    key: String,
}

impl<'a> Iterator for PrefixIter<'a> {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, base)) = self.stack.pop() {
            let node = self.table.nodes.get(id);
            self.key.truncate(base);
            self.key.push_str(&node.label);

            let len = self.key.len();
            for &(_, child) in node.children.iter().rev() {
                self.stack.push((child, len));
            }

            if let Some(value) = node.value {
                return Some((self.key.clone(), value));
            }
        }
        None
    }
}

impl SymbolTable {
    /// Iterates over every stored key in lexicographic order.
    pub fn iter(&self) -> PrefixIter<'_> {
        self.prefix_iter("")
    }

    /// Iterates over the stored keys that start with `prefix`.
    ///
    /// ```rust
    /// use radix_symtab::SymbolTable;
    ///
    /// let mut table = SymbolTable::new();
    /// table.put("card", 3).unwrap();
    /// table.put("car", 2).unwrap();
    /// table.put("cat", 1).unwrap();
    ///
    /// let keys: Vec<String> = table.prefix_iter("car").map(|(k, _)| k).collect();
    /// assert_eq!(keys, ["car", "card"]);
    /// ```
    pub fn prefix_iter(&self, prefix: &str) -> PrefixIter<'_> {
        let (stack, key) = match self.seek(prefix) {
            Some((id, key)) => (vec![(id, key.len())], key),
            None => (Vec::new(), String::new()),
        };
        PrefixIter {
            table: self,
            stack,
            key,
        }
    }

    /// Calls `f` for each stored key starting with `prefix`, stopping after
    /// `max_results` calls. Returns the number of calls made.
    ///
    /// The key is passed as a view into one reused buffer, so nothing is
    /// allocated per result.
    pub fn for_each_prefix<F>(&self, prefix: &str, max_results: usize, mut f: F) -> usize
    where
        F: FnMut(&str, Value),
    {
        if max_results == 0 {
            return 0;
        }
        let Some((start, mut key)) = self.seek(prefix) else {
            return 0;
        };
        let mut count = 0;
        self.visit(start, &mut key, &mut |k: &str, v: Value| {
            f(k, v);
            count += 1;
            count < max_results
        });
        count
    }

    /// Depth-first walk that hands each terminal's key to `f`.
    /// Returns false once `f` asks to stop.
    fn visit<F>(&self, id: NodeId, key: &mut String, f: &mut F) -> bool
    where
        F: FnMut(&str, Value) -> bool,
    {
        let node = self.nodes.get(id);
        let base = key.len();
        key.push_str(&node.label);

        let mut more = match node.value {
            Some(value) => f(key.as_str(), value),
            None => true,
        };
        for &(_, child) in &node.children {
            if !more {
                break;
            }
            more = self.visit(child, key, f);
        }

        key.truncate(base);
        more
    }

    /// Finds the topmost node whose subtree holds exactly the keys starting
    /// with `prefix`, along with the key spelled by its ancestors.
    fn seek(&self, prefix: &str) -> Option<(NodeId, String)> {
        let mut id = NodeId::ROOT;
        let mut rest = prefix;
        let mut key = String::with_capacity(prefix.len());

        loop {
            let node = self.nodes.get(id);
            let common = common_prefix_len(&node.label, rest);
            if common == rest.len() {
                return Some((id, key));
            }
            if common < node.label.len() {
                return None;
            }
            key.push_str(&node.label);
            rest = &rest[common..];
            id = node.child(head(rest)?)?;
        }
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = (String, Value);
    type IntoIter = PrefixIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
