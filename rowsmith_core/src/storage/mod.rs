pub mod mem;
mod persistence;
mod statement;

// Re-export main types for convenience
pub use mem::MemDatabase;
