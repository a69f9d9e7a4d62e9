//! Base directory value types.
//!
//! Provides [`BaseDir`] for a single directory and [`BaseDirs`] for an ordered search list,
//! both with existence lookup, globbing and joining.

pub mod base_dir;
pub mod base_dirs;

pub use base_dir::{BaseDir, GlobError, is_valid};
pub use base_dirs::BaseDirs;
