// ledger/src/adapters/mod.rs
mod memory;

pub use memory::MemoryAdapter;
