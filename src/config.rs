use std::path::PathBuf;

use crate::access::PathGuard;
use crate::error::Error;

/// Environment variable holding the directory allow-list.
pub const ALLOWED_DIR_ENV: &str = "ALLOWED_DIR";

/// Process-wide settings, built once and shared by reference with every
/// `Reader` and `Writer`.
#[derive(Clone, Debug, Default)]
pub struct Config {
    guard: PathGuard,
}

impl Config {
    /// No allow-list: every path is accepted.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn new<I, P>(allowed_dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            guard: PathGuard::new(allowed_dirs.into_iter().map(Into::into).collect()),
        }
    }

    /// Read the allow-list from `ALLOWED_DIR`. Unset or empty means unrestricted.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(ALLOWED_DIR_ENV) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Ok(Self::unrestricted()),
        }
    }

    /// Parse an allow-list value: either one directory, or a JSON list of
    /// directories when the value starts with `[`.
    pub fn from_value(value: &str) -> Result<Self, Error> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::unrestricted());
        }
        if value.starts_with('[') {
            let dirs: Vec<String> = serde_json::from_str(value)?;
            return Ok(Self::new(dirs));
        }
        Ok(Self::new([value]))
    }

    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }
}
