//! # radix-symtab
//!
//! A symbol table mapping string keys to non-zero integers, backed by a
//! compressed radix trie.
//!
//! Nodes carry multi-char edge labels. Inserting a key that diverges inside a
//! label splits that node; removing a key merges any valueless node left with
//! a single child back into it, so the tree never holds single-child chains.
//! Besides exact lookup the trie answers prefix questions: [`complete`]
//! extends a partially typed key as far as it is unambiguous, and
//! [`prefix_iter`] lists every key under a prefix.
//!
//! `0` is not a storable value. It is reserved to mean "absent", which this
//! API reports as `None`.
//!
//! ## Example
//!
//! ```rust
//! use radix_symtab::SymbolTable;
//!
//! let mut table = SymbolTable::new();
//! table.put("hello", 1).unwrap();
//! table.put("help", 2).unwrap();
//!
//! assert_eq!(table.get("hello").map(|v| v.get()), Some(1));
//! assert_eq!(table.get("hel"), None);
//!
//! let mut buf = String::from("he");
//! assert!(table.complete(&mut buf));
//! assert_eq!(buf, "hel");
//! ```
//!
//! The table is a plain single-owner value: share it across threads behind a
//! lock of the caller's choosing.
//!
//! [`complete`]: SymbolTable::complete
//! [`prefix_iter`]: SymbolTable::prefix_iter

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod arena;
mod complete;
mod config;
mod debug;
mod error;
mod iter;
mod node;
mod table;

pub use config::Config;
pub use debug::TreeDump;
pub use error::{Error, Result};
pub use iter::PrefixIter;
pub use table::SymbolTable;

use tracing::warn;

/// A stored value. Zero is unrepresentable.
pub type Value = std::num::NonZeroI32;

/// `tracing` target for every event this crate emits.
pub const LOG_TARGET: &str = "radix_symtab";

impl<K: AsRef<str>> FromIterator<(K, Value)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        table.extend(iter);
        table
    }
}

impl<K: AsRef<str>> Extend<(K, Value)> for SymbolTable {
    /// Inserts every pair; pairs with an empty key are skipped.
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let key = key.as_ref();
            if let Err(error) = self.insert(key, value) {
                warn!(target: LOG_TARGET, key, %error, "Skipping entry");
            }
        }
    }
}


#[cfg(test)]
mod proptests;
