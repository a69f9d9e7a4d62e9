//! XDG Base Directory Specification support.
//!
//! Resolves every category once from the environment, falling back to the XDG defaults for
//! unset or invalid values, and derives per-application views from the result.

use std::{
    env::split_paths,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use tracing::trace;

use crate::config_files::home;
use crate::fs::{BaseDir, BaseDirs, is_valid};
use crate::os::env::Env;

static BASE_DIRECTORIES: LazyLock<BaseDirectories> =
    LazyLock::new(|| BaseDirectories::from_env(&Env::new().with_fallback("HOME", home())));

/// Base directories of the current process, resolved on first access.
pub fn base_directories() -> &'static BaseDirectories {
    &BASE_DIRECTORIES
}

/// [`base_directories`] with `name` appended to every directory.
///
/// ```rust,no_run
/// # use xdgvil::config_files::xdg;
/// let app = xdg::namespaced("myapp");
/// let configs = app.config().find(["config.toml"]);
/// ```
pub fn namespaced(name: impl AsRef<Path>) -> BaseDirectories {
    base_directories().namespaced(name)
}

fn root(env: &Env) -> PathBuf {
    env.get_non_empty("HOME").map(PathBuf::from).unwrap_or_default()
}

fn data_home_fallback(root: &Path) -> BaseDir {
    let mut path = root.to_path_buf();
    path.push(".local");
    path.push("share");
    BaseDir::new(path)
}

fn config_home_fallback(root: &Path) -> BaseDir {
    BaseDir::new(root.join(".config"))
}

fn cache_home_fallback(root: &Path) -> BaseDir {
    BaseDir::new(root.join(".cache"))
}

fn state_home_fallback(root: &Path) -> BaseDir {
    let mut path = root.to_path_buf();
    path.push(".local");
    path.push("state");
    BaseDir::new(path)
}

fn data_dirs_fallback() -> BaseDirs {
    BaseDirs::from_iter([
        BaseDir::new("/usr/local/share"),
        BaseDir::new("/usr/share"),
    ])
}

fn config_dirs_fallback() -> BaseDirs {
    BaseDirs::from_iter([BaseDir::new("/etc/xdg")])
}

fn home_var(env: &Env, key: &str, default: BaseDir) -> BaseDir {
    let value = env.get_os(key);
    let resolved = BaseDir::with_default(value, default);
    if value.is_some_and(|value| resolved.as_path().as_os_str() != value) {
        trace!(key, %resolved, "ignoring invalid value");
    }
    resolved
}

fn dirs_var(env: &Env, key: &str, default: BaseDirs) -> BaseDirs {
    let value = env.get_os(key).unwrap_or_default();
    if !value.is_empty() && !split_paths(value).any(is_valid) {
        trace!(key, "no valid entries, using defaults");
    }
    BaseDirs::with_default(split_paths(value), default)
}

/// Resolved XDG base directories.
///
/// Every `*_home` is either the environment value, if it is non-empty and absolute, or the
/// default built from `$HOME`. `data()` and `config()` are the full search lists: home first,
/// then the `*_dirs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirectories {
    data_home: BaseDir,
    data_dirs: BaseDirs,
    data: BaseDirs,

    config_home: BaseDir,
    config_dirs: BaseDirs,
    config: BaseDirs,

    cache_home: BaseDir,

    state_home: BaseDir,

    runtime_dir: Option<BaseDir>,
}

impl BaseDirectories {
    /// Resolve every category from `env`.
    ///
    /// Unset, empty or relative values silently fall back to the defaults. `$XDG_RUNTIME_DIR`
    /// has no default and is left unset.
    ///
    /// Only `env` is consulted. Without `$HOME` in it, the home defaults are relative
    /// (`.config`, ...); [`base_directories`] fills `$HOME` from [`home`] first.
    ///
    /// # Examples
    /// ```rust
    /// use std::collections::HashMap;
    /// use xdgvil::config_files::xdg::BaseDirectories;
    /// use xdgvil::os::env::Env;
    ///
    /// let env = Env::new_from(HashMap::from([("HOME".into(), "/home/u".into())]));
    /// let dirs = BaseDirectories::from_env(&env);
    /// # #[cfg(unix)]
    /// assert_eq!(dirs.config_home().as_path(), std::path::Path::new("/home/u/.config"));
    /// assert!(dirs.runtime_dir().is_none());
    /// ```
    pub fn from_env(env: &Env) -> Self {
        let root = root(env);

        let data_home = home_var(env, "XDG_DATA_HOME", data_home_fallback(&root));
        let data_dirs = dirs_var(env, "XDG_DATA_DIRS", data_dirs_fallback());

        let config_home = home_var(env, "XDG_CONFIG_HOME", config_home_fallback(&root));
        let config_dirs = dirs_var(env, "XDG_CONFIG_DIRS", config_dirs_fallback());

        let cache_home = home_var(env, "XDG_CACHE_HOME", cache_home_fallback(&root));

        let state_home = home_var(env, "XDG_STATE_HOME", state_home_fallback(&root));

        let runtime_value = env.get_os("XDG_RUNTIME_DIR");
        let runtime_dir = runtime_value.and_then(BaseDir::parse);
        if runtime_value.is_some() && runtime_dir.is_none() {
            trace!(key = "XDG_RUNTIME_DIR", "ignoring invalid value");
        }

        Self::compose(
            data_home,
            data_dirs,
            config_home,
            config_dirs,
            cache_home,
            state_home,
            runtime_dir,
        )
    }

    fn compose(
        data_home: BaseDir,
        data_dirs: BaseDirs,
        config_home: BaseDir,
        config_dirs: BaseDirs,
        cache_home: BaseDir,
        state_home: BaseDir,
        runtime_dir: Option<BaseDir>,
    ) -> Self {
        Self {
            data: data_dirs.with_home(data_home.clone()),
            data_home,
            data_dirs,
            config: config_dirs.with_home(config_home.clone()),
            config_home,
            config_dirs,
            cache_home,
            state_home,
            runtime_dir,
        }
    }

    /// Copy of `self` with `name` appended to every directory.
    ///
    /// The result is not revalidated, and an unset runtime dir stays unset.
    pub fn namespaced(&self, name: impl AsRef<Path>) -> Self {
        let name = name.as_ref();
        let append = |dir: &BaseDir| BaseDir::new(dir.join([name]));
        Self::compose(
            append(&self.data_home),
            self.data_dirs.namespaced(name),
            append(&self.config_home),
            self.config_dirs.namespaced(name),
            append(&self.cache_home),
            append(&self.state_home),
            self.runtime_dir.as_ref().map(append),
        )
    }

    /// `$XDG_DATA_HOME`.
    pub fn data_home(&self) -> &BaseDir {
        &self.data_home
    }

    /// `$XDG_DATA_DIRS`.
    pub fn data_dirs(&self) -> &BaseDirs {
        &self.data_dirs
    }

    /// [`data_home`](Self::data_home) followed by [`data_dirs`](Self::data_dirs).
    pub fn data(&self) -> &BaseDirs {
        &self.data
    }

    /// `$XDG_CONFIG_HOME`.
    pub fn config_home(&self) -> &BaseDir {
        &self.config_home
    }

    /// `$XDG_CONFIG_DIRS`.
    pub fn config_dirs(&self) -> &BaseDirs {
        &self.config_dirs
    }

    /// [`config_home`](Self::config_home) followed by [`config_dirs`](Self::config_dirs).
    pub fn config(&self) -> &BaseDirs {
        &self.config
    }

    /// `$XDG_CACHE_HOME`.
    pub fn cache_home(&self) -> &BaseDir {
        &self.cache_home
    }

    /// `$XDG_STATE_HOME`.
    pub fn state_home(&self) -> &BaseDir {
        &self.state_home
    }

    /// `$XDG_RUNTIME_DIR`, [`None`] if unset or invalid.
    pub fn runtime_dir(&self) -> Option<&BaseDir> {
        self.runtime_dir.as_ref()
    }
}
