use std::path::{Component, Path, PathBuf};

use crate::error::Error;

/// Directory allow-list applied to every read and write entry point.
#[derive(Clone, Debug, Default)]
pub struct PathGuard {
    allowed: Option<Vec<PathBuf>>, // None = unrestricted
}

impl PathGuard {
    pub fn new(allowed_dirs: Vec<PathBuf>) -> Self {
        Self {
            allowed: Some(allowed_dirs.iter().map(|d| resolve(d)).collect()),
        }
    }

    pub fn is_restricted(&self) -> bool {
        self.allowed.is_some()
    }

    pub fn allowed_dirs(&self) -> &[PathBuf] {
        self.allowed.as_deref().unwrap_or(&[])
    }

    /// Resolve `path` and check it is an allowed directory or lies beneath one.
    /// Returns the resolved path.
    pub fn authorize(&self, path: &Path) -> Result<PathBuf, Error> {
        let resolved = resolve(path);
        let Some(allowed) = &self.allowed else {
            return Ok(resolved);
        };
        let permitted = allowed
            .iter()
            .any(|dir| resolved == *dir || resolved.starts_with(dir));
        if permitted {
            Ok(resolved)
        } else {
            log::debug!("Rejected {} (allowed: {:?})", resolved.display(), allowed);
            Err(Error::Unauthorized(resolved))
        }
    }
}

/// Absolute, symlink-resolved form of `path`. Components that do not exist yet
/// (an output file, say) are appended lexically, so `..` and `.` are still
/// normalized away.
fn resolve(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for comp in absolute.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => {
                out.push(other);
                if let Ok(canonical) = out.canonicalize() {
                    out = canonical;
                }
            }
        }
    }
    out
}
