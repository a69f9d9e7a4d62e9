//! OS-level helpers.

pub mod env;
