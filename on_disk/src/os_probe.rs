use std::{fs, io, path::Path};

use gitmeta_core::discover::{EntryKind, PathProbe};

/// Answers discovery questions using `std::fs`.
///
/// Symlinks are followed, so a `.git` symlink pointing at a directory
/// counts as a git directory.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsProbe;

impl PathProbe for OsProbe {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        let file_type = fs::metadata(path)?.file_type();
        Ok(if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }
}
