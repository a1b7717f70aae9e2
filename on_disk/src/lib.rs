//! This crate binds the gitmeta discovery and keyed store to the local
//! file system.
//!
//! [`MetaRepo`] is the usual entry point: it finds the git directory
//! enclosing a path, checks that it looks like a repository, and stores
//! records under `<git dir>/git-meta/`.

#![deny(warnings)]

pub use gitmeta_core::{Error, ErrorKind, Result, StoreConfig};

mod meta_repo;
pub use meta_repo::MetaRepo;

mod os_fs;
pub use os_fs::OsFs;

mod os_probe;
pub use os_probe::OsProbe;

mod temp_git_repo;
pub use temp_git_repo::TempGitRepo;

#[cfg(test)]
mod temp_cwd;
