//! Guards for mutating environment variables in tests.
//!
//! Every mutation is serialised through a global re-entrant mutex and
//! returns an [`EnvVarGuard`] that restores the prior state on drop. Stacked
//! guards for one key restore in LIFO order. Hold [`lock`] when a test must
//! keep the environment stable across several reads, such as building an
//! option set whose defaults come from variables.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("FLAGTAG_EXAMPLE", "VALUE");
//! assert_eq!(std::env::var("FLAGTAG_EXAMPLE").as_deref(), Ok("VALUE"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Applies `mutator` to `key` while holding the environment lock and records
/// the value it replaced.
fn mutate<K, F>(key: K, mutator: F) -> EnvVarGuard
where
    K: Into<String>,
    F: FnOnce(&str),
{
    let key_string = key.into();
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key_string);
    mutator(&key_string);
    EnvVarGuard {
        key: key_string,
        original,
    }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// Name of the guarded variable.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held for the duration of the write.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held for the duration of the write.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// RAII guard holding the environment lock.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnvLock")
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let _g = env::set_var("FLAGTAG_SET", "bar");
/// assert!(matches!(std::env::var("FLAGTAG_SET"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key, |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let _g = env::remove_var("FLAGTAG_REMOVED");
/// assert!(std::env::var("FLAGTAG_REMOVED").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key, |k| unsafe { env::remove_var(k) })
}

/// Acquires the global environment lock until the returned guard drops.
///
/// The lock is re-entrant, so [`set_var`] and [`remove_var`] may still be
/// called from the same thread.
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Runs `f` while holding the global environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock();
    f()
}
