use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use gitmeta_core::kv::StoreFs;

/// A [`StoreFs`] rooted at a directory on the local file system.
///
/// The root directory is created the first time a file is created in it,
/// so a store can be pointed at a directory that doesn't exist yet.
#[derive(Clone, Debug)]
pub struct OsFs {
    root: PathBuf,
}

impl OsFs {
    pub fn new<P: Into<PathBuf>>(root: P) -> OsFs {
        OsFs { root: root.into() }
    }

    /// Return the directory that holds this store's files.
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }
}

impl StoreFs for OsFs {
    type Reader = File;
    type Writer = File;

    fn create(&self, name: &str) -> io::Result<File> {
        fs::create_dir_all(&self.root)?;
        File::create(self.root.join(name))
    }

    fn open(&self, name: &str) -> io::Result<File> {
        File::open(self.root.join(name))
    }
}
