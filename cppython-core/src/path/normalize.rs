//! Lexical path normalization.
//!
//! Nothing here touches the filesystem beyond asking for the home and
//! current directories: configured directories usually do not exist yet
//! when configuration is resolved, so symlinks are never followed.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` to the home directory.
///
/// `~` and `~/rest` are supported; `~user` is rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the path is not valid UTF-8, the home
/// directory cannot be determined, or `~user` syntax is used.
///
/// # Examples
///
/// ```
/// use cppython_core::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/.cppython")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with(".cppython"));
///
/// assert_eq!(expand_tilde(Path::new("build")).unwrap(), Path::new("build"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let text = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "path contains invalid UTF-8".to_string(),
    })?;

    let Some(rest) = text.strip_prefix('~') else {
        return Ok(path.to_path_buf());
    };

    let home = home_dir().map_err(|reason| Error::InvalidPath {
        path: path.to_path_buf(),
        reason,
    })?;

    if rest.is_empty() {
        Ok(home)
    } else if let Some(tail) = rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
        Ok(home.join(tail))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Returns the current user's home directory.
///
/// # Errors
///
/// Returns a human readable reason when the home directory is unknown.
pub fn home_dir() -> std::result::Result<PathBuf, String> {
    home::home_dir()
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or_else(|| "cannot determine home directory".to_string())
}

/// Collapse `.` and `..` components of an absolute path.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if a `..` would climb above the root.
///
/// # Examples
///
/// ```
/// use cppython_core::path::normalize::resolve_components;
/// use std::path::PathBuf;
///
/// let resolved = resolve_components(&PathBuf::from("/proj/./tool/../build")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/proj/build"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    // Number of components that `..` is allowed to pop (root and prefix excluded).
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => result.push(component),
            Component::CurDir => {}
            Component::Normal(part) => {
                result.push(part);
                depth += 1;
            }
            Component::ParentDir => {
                if depth == 0 {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "too many '..' components (escapes root)".to_string(),
                    });
                }
                result.pop();
                depth -= 1;
            }
        }
    }

    Ok(result)
}

/// Anchor `path` at `base` and normalize the result.
///
/// Tilde paths and absolute paths ignore `base`; relative paths are joined
/// onto it. `base` is expected to be absolute already.
///
/// # Errors
///
/// Propagates errors from [`expand_tilde`] and [`resolve_components`].
///
/// # Examples
///
/// ```
/// use cppython_core::path::normalize::anchor_at;
/// use std::path::Path;
///
/// let build = anchor_at(Path::new("/work/proj"), Path::new("out/../build")).unwrap();
/// assert_eq!(build, Path::new("/work/proj/build"));
///
/// let absolute = anchor_at(Path::new("/work/proj"), Path::new("/opt/tools")).unwrap();
/// assert_eq!(absolute, Path::new("/opt/tools"));
/// ```
pub fn anchor_at(base: &Path, path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        resolve_components(&expanded)
    } else {
        resolve_components(&base.join(expanded))
    }
}

/// Normalize a path to absolute form relative to the current directory.
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory cannot
/// be determined, or the path escapes the root.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("cannot get current directory: {e}"),
    })?;
    anchor_at(&cwd, path)
}
