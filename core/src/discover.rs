//! Locate the git directory that encloses a given path.
//!
//! Discovery walks upward from the starting path and stops at the first
//! ancestor that either holds a `.git` directory or is itself a bare
//! repository (contains `HEAD`, `objects`, and `refs`). The closest
//! enclosing repository always wins.
//!
//! The bare check only tests that the three entries exist. It does not
//! check their types or contents, so an unrelated directory that happens
//! to contain three entries with those names is treated as a repository.

use std::{
    env, io,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, trace};

use crate::{Error, Result};

/// Name of the git directory inside a working copy.
pub const GIT_DIR_NAME: &str = ".git";

/// Entries that must all be present for a directory to count as bare.
pub const BARE_MARKERS: [&str; 3] = ["HEAD", "objects", "refs"];

/// What kind of entry a [`PathProbe`] found.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Dir,
    File,
    Other,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == EntryKind::Dir
    }
}

/// The file system questions discovery needs answered.
///
/// `stat` must report a missing entry as an `io::Error` of kind
/// `NotFound`; any other error aborts discovery.
pub trait PathProbe {
    /// Describe the entry at `path`, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Turn `path` into an absolute path.
    ///
    /// The default joins relative paths onto the process's current
    /// directory. Symlinks are not resolved.
    fn absolute(&self, path: &Path) -> io::Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(env::current_dir()?.join(path))
        }
    }
}

/// An absolute path to a git directory found by [`resolve`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GitDir {
    path: PathBuf,
    bare: bool,
}

impl GitDir {
    /// Return the path to the git directory itself.
    ///
    /// For a repository with a working copy, this ends in `.git`. For a
    /// bare repository, it is the repository directory.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Return `true` if this was found as a bare repository.
    pub fn is_bare(&self) -> bool {
        self.bare
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Find the git directory for `start` or its closest ancestor.
///
/// Returns `Error::GitDirNotFound` if the walk reaches the file system
/// root without finding one, and `Error::GitDirNotADirectory` as soon as
/// a `.git` entry turns out to be something other than a directory.
pub fn resolve<P: PathProbe + ?Sized>(probe: &P, start: &Path) -> Result<GitDir> {
    let start = clean(&probe.absolute(start)?);
    let mut path = start.as_path();

    loop {
        let git_dir = path.join(GIT_DIR_NAME);
        trace!(path = %git_dir.display(), "looking for git directory");

        match probe.stat(&git_dir) {
            Ok(kind) if kind.is_dir() => {
                debug!(git_dir = %git_dir.display(), "found git directory");
                return Ok(GitDir {
                    path: git_dir,
                    bare: false,
                });
            }
            Ok(_) => return Err(Error::GitDirNotADirectory(git_dir)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        if is_bare(probe, path)? {
            debug!(git_dir = %path.display(), "found bare repository");
            return Ok(GitDir {
                path: path.to_path_buf(),
                bare: true,
            });
        }

        path = match path.parent() {
            Some(parent) => parent,
            None => return Err(Error::GitDirNotFound(start.clone())),
        };
    }
}

/// Return `true` if `path` contains every entry in [`BARE_MARKERS`].
pub fn is_bare<P: PathProbe + ?Sized>(probe: &P, path: &Path) -> Result<bool> {
    for marker in BARE_MARKERS.iter() {
        match probe.stat(&path.join(marker)) {
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                trace!(path = %path.display(), marker = *marker, "not a bare repository");
                return Ok(false);
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(true)
}

// Lexically remove `.` and `..` components. A `..` at the root stays at
// the root.
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}
