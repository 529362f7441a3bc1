//! Storage implementations for cash cards

pub mod in_memory;

pub use in_memory::InMemoryCashCardStore;
