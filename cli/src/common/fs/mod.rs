//! # warembed Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! Filesystem helpers shared by the commands and the config loader. Import
//! from the submodule directly, e.g. `crate::common::fs::io::ensure_dir_exists`.
//!

/// Basic file I/O (`ensure_dir_exists`, `read_file_to_string`).
pub mod io;
