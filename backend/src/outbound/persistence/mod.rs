//! Persistence adapters for the entity store ports.

mod memory;

pub use memory::MemoryStore;
