use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

/// Snapshot of the environment the base directories are resolved from.
///
/// Lookup is exact first; on Windows, where environmental variables are case-insensitive, it
/// falls back to an upper-cased key.
#[derive(Debug, Clone)]
pub struct Env {
    keys: HashMap<OsString, OsString>,

    normalised_keys: HashMap<OsString, OsString>,
}

impl Env {
    /// Create new [`Env`] from [`std::env::vars_os`].
    pub fn new() -> Self {
        Self::new_from(std::env::vars_os().collect())
    }

    /// Create new [`Env`] using `env` as existing environmental variables.
    ///
    /// # Examples
    /// ```rust
    /// use std::collections::HashMap;
    /// use xdgvil::os::env::Env;
    ///
    /// let env = Env::new_from(HashMap::from([("HOME".into(), "/home/u".into())]));
    /// assert_eq!(env.get_os("HOME"), Some(std::ffi::OsStr::new("/home/u")));
    /// ```
    pub fn new_from(env: HashMap<OsString, OsString>) -> Self {
        Self {
            normalised_keys: Env::normalize_map(&env),
            keys: env,
        }
    }

    fn normalize_key(key: impl AsRef<OsStr>) -> OsString {
        key.as_ref().to_ascii_uppercase()
    }

    fn normalize_map(keys: &HashMap<OsString, OsString>) -> HashMap<OsString, OsString> {
        keys.iter()
            .map(|(key, value)| (Env::normalize_key(key), value.clone()))
            .collect()
    }

    /// Get environmental variable pointed by `key`.
    ///
    /// # Returns
    /// `None` for a missing key. Empty values are returned as-is, validation is up to the
    /// caller.
    pub fn get_os(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        match self.keys.get(key) {
            Some(x) => Some(x),
            None => {
                if cfg!(target_os = "windows") {
                    self.normalised_keys
                        .get(&Env::normalize_key(key))
                        .map(|x| x.as_ref())
                } else {
                    None
                }
            }
        }
    }

    /// Set `key` to `value` if it is missing or empty.
    pub fn with_fallback(
        mut self,
        key: impl Into<OsString>,
        value: Option<impl Into<OsString>>,
    ) -> Self {
        let key = key.into();
        let Some(value) = value else {
            return self;
        };
        if self.get_non_empty(&key).is_none() {
            let value = value.into();
            self.normalised_keys
                .insert(Env::normalize_key(&key), value.clone());
            self.keys.insert(key, value);
        }
        self
    }

    /// Like [`Env::get_os`], but treats an empty value as missing.
    pub fn get_non_empty(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.get_os(key).filter(|value| !value.is_empty())
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
