use std::{
    ffi::OsStr,
    fmt, io,
    path::{Component, Path, PathBuf},
};

use thiserror::Error;

/// Errors encountered when globbing under a [`BaseDir`].
#[derive(Debug, Error)]
pub enum GlobError {
    /// The pattern itself is malformed.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Reading a directory failed while walking the pattern.
    #[error(transparent)]
    Io(#[from] glob::GlobError),

    /// Base joined with the pattern is not an UTF-8 string, which [`glob`] requires.
    #[error("glob pattern `{0:?}` is not an UTF-8 string")]
    NonUTF8(PathBuf),
}

/// Returns `true` if `path` is non-empty and absolute.
pub fn is_valid(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Single base directory, like `$XDG_CONFIG_HOME`.
///
/// Values handed out by [`BaseDirectories`](crate::config_files::xdg::BaseDirectories) are
/// always [valid](BaseDir::is_valid). Absence is expressed with `Option<BaseDir>` rather than an
/// empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BaseDir(PathBuf);

impl BaseDir {
    /// Wrap `path` without validating it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns [`Some`] iff `candidate` is [valid](is_valid).
    pub fn parse(candidate: impl AsRef<OsStr>) -> Option<Self> {
        let candidate = Path::new(candidate.as_ref());
        is_valid(candidate).then(|| Self::new(candidate))
    }

    /// Returns `candidate` if it is [valid](is_valid), otherwise `default`.
    ///
    /// # Examples
    /// ```rust
    /// use std::path::Path;
    /// use xdgvil::fs::BaseDir;
    ///
    /// let default = BaseDir::new("/home/u/.cache");
    /// assert_eq!(BaseDir::with_default(Some("relative"), default.clone()), default);
    /// # #[cfg(unix)]
    /// assert_eq!(
    ///     BaseDir::with_default(Some("/tmp/cache"), default).as_path(),
    ///     Path::new("/tmp/cache")
    /// );
    /// ```
    pub fn with_default(candidate: Option<impl AsRef<OsStr>>, default: BaseDir) -> Self {
        candidate.and_then(Self::parse).unwrap_or(default)
    }

    /// See [`is_valid`].
    pub fn is_valid(&self) -> bool {
        is_valid(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join `segments` onto `self`.
    ///
    /// Segments are always appended below `self`: root and prefix components of an absolute
    /// segment are dropped instead of replacing the base. Separators are handled by the host,
    /// `..` is kept as it is.
    pub fn join<I>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let mut joined = self.0.clone();
        for segment in segments {
            let relative = segment
                .as_ref()
                .components()
                .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)));
            joined.extend(relative);
        }
        joined
    }

    /// Join `segments` onto `self` and return the result if it exists.
    ///
    /// Errors while checking are treated as "not found"; use [`BaseDir::try_find`] to tell
    /// them apart.
    pub fn find<I>(&self, segments: I) -> Option<PathBuf>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        self.try_find(segments).ok().flatten()
    }

    /// Join `segments` onto `self` and check whether the result exists.
    ///
    /// # Returns
    /// `Ok(Some(path))` if it exists, `Ok(None)` if it definitely doesn't, and `Err` if
    /// existence couldn't be confirmed (see [`Path::try_exists`]).
    pub fn try_find<I>(&self, segments: I) -> io::Result<Option<PathBuf>>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let file = self.join(segments);
        Ok(file.try_exists()?.then_some(file))
    }

    /// Expand `pattern` relative to `self`.
    ///
    /// Matches are in whatever order [`glob::glob`] yields them. The first error is returned.
    ///
    /// ```rust,no_run
    /// # use xdgvil::fs::BaseDir;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let themes = BaseDir::new("/usr/share/themes").glob("*/gtk-3.0")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, GlobError> {
        let joined = self.join([pattern]);
        let Some(full) = joined.to_str() else {
            return Err(GlobError::NonUTF8(joined));
        };
        glob::glob(full)?
            .map(|entry| entry.map_err(GlobError::from))
            .collect()
    }
}

impl AsRef<Path> for BaseDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for BaseDir {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<BaseDir> for PathBuf {
    fn from(dir: BaseDir) -> Self {
        dir.0
    }
}

impl fmt::Display for BaseDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.display(), f)
    }
}
