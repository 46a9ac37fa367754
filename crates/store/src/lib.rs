//! Persistence backends for EduAssist.

pub mod in_memory;
pub mod json_file;
pub mod noop;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use noop::NoopStore;
