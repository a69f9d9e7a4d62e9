//! Xdgvil - XDG Base Directory resolution.
//!
//! This crate resolves the XDG data, config, cache, state and runtime directories from the
//! environment, and provides search, glob and namespacing helpers over them.

pub mod config_files;
pub mod fs;
pub mod os;
