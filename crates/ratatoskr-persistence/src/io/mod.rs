//! File-backed storage.
//!
//! This module handles:
//! - Mapping storage keys to files in a directory
//! - Saving records with atomic writes

mod file;

pub use file::FileStorage;
