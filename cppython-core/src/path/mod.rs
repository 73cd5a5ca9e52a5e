//! Path handling for configuration resolution.
//!
//! Configured directories are anchored at the project root and normalized
//! lexically:
//! - Expanding tilde (~) to the home directory
//! - Joining relative paths onto an absolute base
//! - Resolving `.` and `..` components
//!
//! # Examples
//!
//! ```
//! use cppython_core::path::normalize::anchor_at;
//! use std::path::Path;
//!
//! let root = Path::new("/home/dev/project");
//! let tool = anchor_at(root, Path::new("tool")).unwrap();
//! assert_eq!(tool, Path::new("/home/dev/project/tool"));
//! ```

pub mod normalize;
