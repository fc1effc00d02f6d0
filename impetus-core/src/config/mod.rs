//! Configuration types
//!
//! Board-agnostic watch settings stored as postcard binary data.

pub mod types;

pub use types::*;
