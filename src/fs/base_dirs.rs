use std::{
    ffi::OsStr,
    io,
    ops::Deref,
    path::{Path, PathBuf},
};

use super::base_dir::{BaseDir, GlobError};

/// Ordered list of [`BaseDir`]s, like `$XDG_DATA_DIRS`.
///
/// Earlier entries take precedence. Every query is delegated to each [`BaseDir`] in order and
/// the results are concatenated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BaseDirs(Vec<BaseDir>);

impl BaseDirs {
    pub fn new(dirs: Vec<BaseDir>) -> Self {
        Self(dirs)
    }

    /// Keep the [valid](crate::fs::is_valid) `candidates`, in order.
    ///
    /// If none of them is valid, the whole `default` is returned instead; valid candidates are
    /// never mixed with defaults.
    ///
    /// # Examples
    /// ```rust
    /// use xdgvil::fs::{BaseDir, BaseDirs};
    ///
    /// let default = BaseDirs::from_iter([BaseDir::new("/etc/xdg")]);
    /// assert_eq!(BaseDirs::with_default(["", "relative"], default.clone()), default);
    /// ```
    pub fn with_default<I>(candidates: I, default: BaseDirs) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let valid: Self = candidates.into_iter().filter_map(BaseDir::parse).collect();
        if valid.is_empty() { default } else { valid }
    }

    /// Prepend `home`, producing a full search list.
    pub fn with_home(&self, home: BaseDir) -> Self {
        std::iter::once(home).chain(self.0.iter().cloned()).collect()
    }

    /// [`BaseDir::find`] on every entry, keeping the hits.
    ///
    /// Every entry is checked, so an application can merge e.g. system and user configs.
    pub fn find<I>(&self, segments: I) -> Vec<PathBuf>
    where
        I: IntoIterator + Clone,
        I::Item: AsRef<Path>,
    {
        self.0
            .iter()
            .filter_map(|dir| dir.find(segments.clone()))
            .collect()
    }

    /// [`BaseDir::try_find`] on every entry, keeping the hits.
    ///
    /// # Returns
    /// The first error encountered, if any check was inconclusive.
    pub fn try_find<I>(&self, segments: I) -> io::Result<Vec<PathBuf>>
    where
        I: IntoIterator + Clone,
        I::Item: AsRef<Path>,
    {
        let mut found = Vec::new();
        for dir in &self.0 {
            found.extend(dir.try_find(segments.clone())?);
        }
        Ok(found)
    }

    /// [`BaseDir::glob`] on every entry, concatenated in list order.
    ///
    /// The first failing entry aborts the whole call; partial matches are dropped.
    pub fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, GlobError> {
        let mut matches = Vec::new();
        for dir in &self.0 {
            matches.extend(dir.glob(pattern)?);
        }
        Ok(matches)
    }

    /// [`BaseDir::join`] on every entry.
    pub fn join<I>(&self, segments: I) -> Vec<PathBuf>
    where
        I: IntoIterator + Clone,
        I::Item: AsRef<Path>,
    {
        self.0.iter().map(|dir| dir.join(segments.clone())).collect()
    }

    /// Append `name` to every entry, keeping the order.
    pub fn namespaced(&self, name: impl AsRef<Path>) -> Self {
        let name = name.as_ref();
        self.0.iter().map(|dir| BaseDir::new(dir.join([name]))).collect()
    }
}

impl Deref for BaseDirs {
    type Target = [BaseDir];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<BaseDir> for BaseDirs {
    fn from_iter<T: IntoIterator<Item = BaseDir>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for BaseDirs {
    type Item = BaseDir;
    type IntoIter = std::vec::IntoIter<BaseDir>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BaseDirs {
    type Item = &'a BaseDir;
    type IntoIter = std::slice::Iter<'a, BaseDir>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_matches, assert_ok};
    use tempfile::{TempDir, tempdir};

    fn dir_with(files: &[&str]) -> TempDir {
        let tmp = tempdir().expect("needed for tests");
        for file in files {
            std::fs::write(tmp.path().join(file), file).expect("needed for tests");
        }
        tmp
    }

    fn dirs_of(tmps: &[&TempDir]) -> BaseDirs {
        tmps.iter().map(|tmp| BaseDir::new(tmp.path())).collect()
    }

    #[test]
    fn with_default_keeps_only_valid() {
        let root = std::env::temp_dir();
        let a = root.join("a");
        let b = root.join("b");
        let default = BaseDirs::from_iter([BaseDir::new(root.join("default"))]);

        let dirs = BaseDirs::with_default(
            [a.as_os_str(), OsStr::new(""), OsStr::new("rel"), b.as_os_str()],
            default,
        );
        assert_eq!(dirs, BaseDirs::new(vec![BaseDir::new(&a), BaseDir::new(&b)]));
    }

    #[test]
    fn with_default_falls_back_atomically() {
        let root = std::env::temp_dir();
        let default =
            BaseDirs::from_iter([BaseDir::new(root.join("one")), BaseDir::new(root.join("two"))]);

        assert_eq!(BaseDirs::with_default(["", "x", "./y"], default.clone()), default);
        assert_eq!(
            BaseDirs::with_default(Vec::<&str>::new(), default.clone()),
            default
        );
    }

    #[test]
    fn with_home_goes_first() {
        let root = std::env::temp_dir();
        let dirs = BaseDirs::from_iter([BaseDir::new(root.join("sys"))]);
        let full = dirs.with_home(BaseDir::new(root.join("home")));

        assert_eq!(
            full,
            BaseDirs::from_iter([BaseDir::new(root.join("home")), BaseDir::new(root.join("sys"))])
        );
    }

    #[test]
    fn find_checks_every_entry() {
        let first = dir_with(&["app.conf"]);
        let second = dir_with(&[]);
        let third = dir_with(&["app.conf"]);
        let dirs = dirs_of(&[&first, &second, &third]);

        assert_eq!(
            dirs.find(["app.conf"]),
            vec![first.path().join("app.conf"), third.path().join("app.conf")]
        );
        assert_eq!(
            assert_ok!(dirs.try_find(["app.conf"])),
            vec![first.path().join("app.conf"), third.path().join("app.conf")]
        );
        assert!(dirs.find(["missing"]).is_empty());
    }

    #[test]
    fn glob_concatenates() {
        let first = dir_with(&["abc", "cbc", "xyz"]);
        let second = dir_with(&["bbc", "tcl", "pcb"]);
        let mut expected = vec![
            first.path().join("abc"),
            first.path().join("cbc"),
            second.path().join("bbc"),
        ];
        expected.sort();

        let mut actual = assert_ok!(dirs_of(&[&first, &second]).glob("*bc"));
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn glob_keeps_list_order() {
        let first = dir_with(&["b.toml"]);
        let second = dir_with(&["a.toml"]);

        assert_eq!(
            assert_ok!(dirs_of(&[&first, &second]).glob("*.toml")),
            vec![first.path().join("b.toml"), second.path().join("a.toml")]
        );
    }

    #[test]
    fn glob_error_discards_partial_results() {
        let first = dir_with(&["abc"]);
        let dirs = BaseDirs::from_iter([
            BaseDir::new(first.path()),
            BaseDir::new(first.path().join("x[")),
        ]);

        assert_eq!(assert_ok!(dirs[0].glob("*bc")), vec![first.path().join("abc")]);
        assert_matches!(dirs.glob("*bc"), Err(GlobError::Pattern(_)));
    }

    #[cfg(unix)]
    #[test]
    fn try_find_stops_at_first_inconclusive_entry() {
        let first = dir_with(&["file"]);
        let second = dir_with(&["file"]);
        let dirs = BaseDirs::from_iter([
            BaseDir::new(first.path().join("file")),
            BaseDir::new(second.path()),
        ]);

        assert_err!(dirs.try_find(["file"]));
        assert_eq!(dirs.find(["file"]), vec![second.path().join("file")]);
    }

    #[test]
    fn namespaced_absolute_name_stays_below_each_entry() {
        let root = std::env::temp_dir();
        let dirs =
            BaseDirs::from_iter([BaseDir::new(root.join("one")), BaseDir::new(root.join("two"))]);
        let name = root.join("myapp");

        let namespaced = dirs.namespaced(&name);
        assert!(namespaced[0].as_path().starts_with(root.join("one")));
        assert!(namespaced[1].as_path().starts_with(root.join("two")));
        assert!(namespaced.iter().all(|dir| dir.as_path().ends_with("myapp")));
    }

    #[test]
    fn join_every_entry() {
        let root = std::env::temp_dir();
        let dirs =
            BaseDirs::from_iter([BaseDir::new(root.join("one")), BaseDir::new(root.join("two"))]);

        assert_eq!(
            dirs.join(["app", "x"]),
            vec![root.join("one").join("app").join("x"), root.join("two").join("app").join("x")]
        );
    }

    #[test]
    fn namespaced_preserves_order() {
        let root = std::env::temp_dir();
        let dirs =
            BaseDirs::from_iter([BaseDir::new(root.join("one")), BaseDir::new(root.join("two"))]);

        assert_eq!(
            dirs.namespaced("myapp"),
            BaseDirs::from_iter([
                BaseDir::new(root.join("one").join("myapp")),
                BaseDir::new(root.join("two").join("myapp")),
            ])
        );
    }
}
