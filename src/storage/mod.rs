//! Served-directory storage
//!
//! Read-only access to the directory the server exposes.

pub mod operations;

pub use operations::{list_directory, open_file, render_listing};
