//! Configuration file utilities and standard directory paths.
//!
//! Provides helpers for locating configuration files, including XDG Base Directory support.
//!
//! ```rust,no_run
//! # use xdgvil::config_files::xdg;
//! let app = xdg::namespaced("myapp");
//!
//! // Every `myapp/config.toml` on the search list, user config first.
//! let configs = app.config().find(["config.toml"]);
//! let cache = app.cache_home().join(["index.db"]);
//! ```

use std::{env::home_dir, path::PathBuf};

pub mod xdg;

/// Wrapper around [`std::env::home_dir`].
pub fn home() -> Option<PathBuf> {
    home_dir()
}
