//! Storage for the flat files the tool reads and writes.
//!
//! Everything lives under the configured `config_dir`; see [`local`] for the
//! layout. Files are read or written whole within a single call.

pub mod local;

// Re-export for convenience
pub use local::LocalStorage;
