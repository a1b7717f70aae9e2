use std::{
    env,
    path::{Path, PathBuf},
};

use crate::TempGitRepo;

// Moves the process into a directory inside a `TempGitRepo` for the
// lifetime of the guard, so discovery can be run from the current
// directory or from paths relative to it. The previous working
// directory comes back on drop.
//
// Panics on failure, like `TempGitRepo`. Tests that use it must be
// marked #[serial].
pub(crate) struct TempCwd {
    old_path: PathBuf,
    cwd: PathBuf,
}

impl TempCwd {
    // Create `rel` below the repo root if needed and make it the
    // current directory.
    pub fn in_repo<P: AsRef<Path>>(repo: &TempGitRepo, rel: P) -> TempCwd {
        let cwd = repo.mkdir(rel);
        let old_path = env::current_dir().unwrap();
        env::set_current_dir(&cwd).unwrap();

        TempCwd { old_path, cwd }
    }

    // The directory that is now current, as built from the repo path.
    pub fn path(&self) -> &Path {
        self.cwd.as_path()
    }
}

impl Drop for TempCwd {
    fn drop(&mut self) {
        env::set_current_dir(&self.old_path).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::TempCwd;
    use crate::TempGitRepo;

    #[test]
    #[serial]
    fn moves_into_repo_and_back() {
        let old_path = env::current_dir().unwrap();
        let tgr = TempGitRepo::new();

        {
            let tcwd = TempCwd::in_repo(&tgr, "x/y");
            assert_eq!(tcwd.path(), tgr.path().join("x/y"));
            assert!(tcwd.path().is_dir());

            // MacOS may prefix the temp path with /private, so only
            // the tail is compared.
            assert!(env::current_dir().unwrap().ends_with("x/y"));
            assert!(env::current_dir().unwrap().join("../../.git/HEAD").is_file());
        }

        assert_eq!(env::current_dir().unwrap(), old_path);
    }

    #[test]
    #[serial]
    fn repo_root_itself() {
        let tgr = TempGitRepo::new_bare();
        let tcwd = TempCwd::in_repo(&tgr, "");
        assert_eq!(tcwd.path(), tgr.path());
        assert!(env::current_dir().unwrap().join("HEAD").is_file());
    }
}
