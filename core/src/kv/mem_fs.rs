use std::{
    cell::RefCell,
    collections::BTreeMap,
    io::{self, Cursor, Write},
    rc::Rc,
};

use super::StoreFs;

type Files = Rc<RefCell<BTreeMap<String, Vec<u8>>>>;

/// A [`StoreFs`] that keeps files in memory.
///
/// Clones share the same files, so a test can hand one clone to a
/// [`KeyedStore`](super::KeyedStore) and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct MemFs {
    files: Files,
}

impl MemFs {
    pub fn new() -> MemFs {
        MemFs::default()
    }

    /// Return the names of all files, in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }

    /// Return a copy of the contents of `name`, if it exists.
    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(name).cloned()
    }

    /// Replace the contents of `name` outright.
    pub fn insert<B: Into<Vec<u8>>>(&self, name: &str, contents: B) {
        self.files
            .borrow_mut()
            .insert(name.to_owned(), contents.into());
    }
}

/// Write handle returned by [`MemFs::create`].
///
/// Each write is appended to the shared file immediately.
#[derive(Debug)]
pub struct MemWriter {
    files: Files,
    name: String,
}

impl Write for MemWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.files
            .borrow_mut()
            .entry(self.name.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl StoreFs for MemFs {
    type Reader = Cursor<Vec<u8>>;
    type Writer = MemWriter;

    fn create(&self, name: &str) -> io::Result<MemWriter> {
        self.files.borrow_mut().insert(name.to_owned(), Vec::new());
        Ok(MemWriter {
            files: Rc::clone(&self.files),
            name: name.to_owned(),
        })
    }

    fn open(&self, name: &str) -> io::Result<Cursor<Vec<u8>>> {
        self.contents(name).map(Cursor::new).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: file does not exist", name),
            )
        })
    }
}
