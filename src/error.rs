use thiserror::Error;

/// Errors reported by [`SymbolTable`](crate::SymbolTable) mutations.
///
/// A missing key is not an error: lookups and removals report it as `None`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `0` is reserved to mean "no value" and cannot be stored.
    #[error("value 0 is reserved as the absent sentinel")]
    ZeroValue,
    /// The empty string labels the root and is not a storable key.
    #[error("empty key cannot be stored")]
    EmptyKey,
}

/// Result alias for table operations.
pub type Result<T> = std::result::Result<T, Error>;
