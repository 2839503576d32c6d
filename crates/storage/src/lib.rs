//! Storage abstraction and implementations for the mahjong tutor.
//!
//! This crate provides a trait-based key-value interface with a JSON file
//! backend and an in-memory backend.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{validate_key, Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
