// Implementations for the leveling system.

pub mod in_memory;

// Re-export for convenience
pub use in_memory::InMemoryXpStore;
