//! Debug utilities: tree dump and structural self-check.

use std::fmt;

use crate::arena::NodeId;
use crate::node::Node;
use crate::table::SymbolTable;

/// Human-readable view of the trie, one node per line.
///
/// Each line is `- label`, followed by ` = value` for stored keys, indented
/// four spaces per level. The root is not printed.
pub struct TreeDump<'a> {
    table: &'a SymbolTable,
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.table.nodes.get(NodeId::ROOT);
        for &(_, child) in &root.children {
            self.write_node(f, child, 0)?;
        }
        Ok(())
    }
}

impl TreeDump<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let node = self.table.nodes.get(id);
        write!(f, "{:indent$}- {}", "", node.label, indent = depth * 4)?;
        if let Some(value) = node.value {
            write!(f, " = {value}")?;
        }
        writeln!(f)?;
        for &(_, child) in &node.children {
            self.write_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl SymbolTable {
    /// Returns a displayable dump of the tree structure.
    pub fn tree(&self) -> TreeDump<'_> {
        TreeDump { table: self }
    }

    /// Renders the tree structure into a string.
    pub fn dump(&self) -> String {
        self.tree().to_string()
    }

    /// Checks the tree's structural invariants and returns one message per violation.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let root = self.nodes.get(NodeId::ROOT);
        if !root.label.is_empty() {
            issues.push(format!("root has label {:?}", root.label));
        }
        if root.is_terminal() {
            issues.push("root holds a value".to_owned());
        }

        let mut reachable = 1;
        let mut stored = 0;
        let mut stack = vec![(NodeId::ROOT, String::new())];
        while let Some((id, path)) = stack.pop() {
            let node = self.nodes.get(id);
            Self::verify_children(node, &path, &mut issues);

            for &(first, child) in &node.children {
                let child_node = self.nodes.get(child);
                let child_path = format!("{path}{}", child_node.label);
                reachable += 1;

                if child_node.label.is_empty() {
                    issues.push(format!("empty label below {path:?}"));
                } else if child_node.first_char() != Some(first) {
                    issues.push(format!(
                        "{child_path:?} is filed under {first:?} by its parent"
                    ));
                }
                if child_node.is_terminal() {
                    stored += 1;
                } else if child_node.children.len() == 1 {
                    issues.push(format!("{child_path:?} has no value and a single child"));
                } else if child_node.children.is_empty() {
                    issues.push(format!("{child_path:?} has no value and no children"));
                }
                stack.push((child, child_path));
            }
        }

        if stored != self.len {
            issues.push(format!("{stored} stored keys reachable but len is {}", self.len));
        }
        if reachable != self.nodes.live() {
            issues.push(format!(
                "{reachable} nodes reachable but arena holds {}",
                self.nodes.live()
            ));
        }
        issues
    }

    fn verify_children(node: &Node, path: &str, issues: &mut Vec<String>) {
        for pair in node.children.windows(2) {
            if pair[0].0 >= pair[1].0 {
                issues.push(format!(
                    "children of {path:?} out of order or duplicated: {:?} then {:?}",
                    pair[0].0, pair[1].0
                ));
            }
        }
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
