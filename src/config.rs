/// Configuration for a [`SymbolTable`](crate::SymbolTable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of nodes to reserve up front. Growth past it is unbounded.
    pub initial_capacity: usize,
}

impl Config {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of nodes reserved at creation.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
        }
    }
}
