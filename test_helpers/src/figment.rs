//! Shared helpers for working with `figment::Jail` in tests.
//!
//! These utilities centralise the common pattern of initialising a jail,
//! running a closure that performs setup work (writing store files, injecting
//! environment variables), and propagating the closure's return value as an
//! `anyhow::Result`.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down automatically once the closure completes, even when
/// the closure returns an error.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes `contents` to `name` inside the jail and returns its absolute path.
///
/// # Errors
///
/// Returns a [`figment::Error`] when the file cannot be written or its path
/// is not valid UTF-8.
pub fn write_store(
    jail: &mut figment::Jail,
    name: &str,
    contents: &str,
) -> figment::error::Result<Utf8PathBuf> {
    jail.create_file(name, contents)?;
    let path = jail.directory().join(name);
    Utf8PathBuf::from_path_buf(path)
        .map_err(|path| figment_error(format!("non UTF-8 jail path: {}", path.display())))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers often own the error and passing by value avoids extra clones"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
