//! In-memory task store used by tests and simulation mode.

mod store;

pub use store::InMemoryTaskStore;
