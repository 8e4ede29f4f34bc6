//! Storage module for file management
//!
//! Provides the local-disk backend used for uploaded media.

mod local_disk;

pub use local_disk::LocalDiskStorage;
