//! A keyed store that lives inside a git directory on the local file
//! system.

use std::{
    env, io,
    path::{Path, PathBuf},
};

use gitmeta_core::{
    discover::{self, EntryKind, GitDir, PathProbe},
    kv::KeyedStore,
    Error, Result, StoreConfig,
};
use tracing::debug;

use crate::{OsFs, OsProbe};

/// A git repository found on disk, together with the keyed store kept in
/// its git directory.
///
/// Records are stored under `<git dir>/<store_dir>/` for both regular and
/// bare repositories, where `store_dir` comes from [`StoreConfig`]
/// (`git-meta` by default).
#[derive(Debug)]
pub struct MetaRepo {
    git_dir: GitDir,
    store_dir: PathBuf,
    store: KeyedStore<OsFs>,
}

impl MetaRepo {
    /// Find the repository enclosing `start` and bind a store to it using
    /// the default configuration.
    pub fn open<P: AsRef<Path>>(start: P) -> Result<Self> {
        MetaRepo::open_with_config(start, &StoreConfig::default())
    }

    /// Find the repository enclosing `start` and bind a store to it.
    ///
    /// Fails with `Error::GitDirNotFound` if no repository encloses
    /// `start`, and with `Error::InvalidRepo` if the git directory that
    /// was found is missing part of the standard layout.
    pub fn open_with_config<P: AsRef<Path>>(start: P, config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        let git_dir = discover::resolve(&OsProbe, start.as_ref())?;
        check_layout(&OsProbe, git_dir.path())?;

        let store_dir = git_dir.path().join(&config.store_dir);
        debug!(
            git_dir = %git_dir.path().display(),
            bare = git_dir.is_bare(),
            store_dir = %store_dir.display(),
            "opened repository"
        );

        Ok(MetaRepo {
            store: KeyedStore::new(OsFs::new(&store_dir)),
            git_dir,
            store_dir,
        })
    }

    /// Discover a repository starting from the current working directory.
    pub fn from_current_dir() -> Result<Self> {
        let path = env::current_dir()?;
        MetaRepo::open(path)
    }

    /// Return the git directory this store is bound to.
    pub fn git_dir(&self) -> &GitDir {
        &self.git_dir
    }

    /// Return the directory that holds the record files.
    pub fn store_dir(&self) -> &Path {
        self.store_dir.as_path()
    }

    pub fn store(&self) -> &KeyedStore<OsFs> {
        &self.store
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.store.set(key, value)
    }

    /// Return the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<String> {
        self.store.get(key)
    }

    /// Return `true` if a value is stored under `key`.
    pub fn contains(&self, key: &str) -> Result<bool> {
        self.store.contains(key)
    }
}

// Make sure the git directory can actually be opened as a repository:
// `HEAD` must be a file, `objects` and `refs` must be directories.
fn check_layout<P: PathProbe + ?Sized>(probe: &P, git_dir: &Path) -> Result<()> {
    for &(name, want) in &[
        ("HEAD", EntryKind::File),
        ("objects", EntryKind::Dir),
        ("refs", EntryKind::Dir),
    ] {
        let kind = match probe.stat(&git_dir.join(name)) {
            Ok(kind) => kind,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(invalid_repo(git_dir, format!("{} is missing", name)));
            }
            Err(err) => return Err(err.into()),
        };

        if kind != want {
            let expected = if want.is_dir() { "a directory" } else { "a file" };
            return Err(invalid_repo(
                git_dir,
                format!("{} is not {}", name, expected),
            ));
        }
    }
    Ok(())
}

fn invalid_repo(git_dir: &Path, reason: String) -> Error {
    Error::InvalidRepo {
        path: git_dir.to_path_buf(),
        reason,
    }
}
