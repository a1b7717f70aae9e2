use std::{
    fs,
    path::{Path, PathBuf},
};

/// A `TempGitRepo` lays out an empty git repository in a temporary
/// directory. The layout matches what `git init` (or `git init --bare`)
/// produces, minus the sample hooks, so discovery can be tested against
/// realistic trees without needing git on the host.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub struct TempGitRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    path: PathBuf,
    git_dir: PathBuf,
}

impl TempGitRepo {
    // Create a repo with a working copy. The git directory is
    // `<path>/.git`. Everything is deleted when the struct is dropped.
    pub fn new() -> TempGitRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().to_path_buf();
        let git_dir = path.join(".git");

        init(&git_dir, false);

        TempGitRepo {
            tempdir,
            path,
            git_dir,
        }
    }

    // Create a bare repo. The repo path is also the git directory.
    pub fn new_bare() -> TempGitRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("repo.git");

        init(&path, true);

        TempGitRepo {
            tempdir,
            git_dir: path.clone(),
            path,
        }
    }

    // Return the path for this repo's root (working directory, or the
    // repo itself when bare).
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    // Return the path to the git directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    // Create a directory (and its parents) below the repo root and
    // return its path.
    pub fn mkdir<P: AsRef<Path>>(&self, rel: P) -> PathBuf {
        let dir = self.path.join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }
}

impl Default for TempGitRepo {
    fn default() -> Self {
        TempGitRepo::new()
    }
}

fn init(git_dir: &Path, bare: bool) {
    fs::create_dir_all(git_dir).unwrap();

    let config_txt = format!(
        "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = {}\n{}",
        bare,
        if bare { "" } else { "\tlogallrefupdates = true\n" }
    );
    fs::write(git_dir.join("config"), config_txt).unwrap();

    let desc_txt = "Unnamed repository; edit this file 'description' to name the repository.\n";
    fs::write(git_dir.join("description"), desc_txt).unwrap();

    fs::write(git_dir.join("HEAD"), "ref: refs/heads/master\n").unwrap();

    // NOTE: Intentionally not including the sample hooks.
    fs::create_dir_all(git_dir.join("hooks")).unwrap();

    let info_dir = git_dir.join("info");
    fs::create_dir_all(&info_dir).unwrap();
    let exclude_txt = "# git ls-files --others --exclude-from=.git/info/exclude\n# Lines that start with '#' are comments.\n# For a project mostly in C, the following would be a good set of\n# exclude patterns (uncomment them if you want to use them):\n# *.[oa]\n# *~\n.DS_Store\n";
    fs::write(info_dir.join("exclude"), exclude_txt).unwrap();

    fs::create_dir_all(git_dir.join("objects/info")).unwrap();
    fs::create_dir_all(git_dir.join("objects/pack")).unwrap();
    fs::create_dir_all(git_dir.join("refs/heads")).unwrap();
    fs::create_dir_all(git_dir.join("refs/tags")).unwrap();
}
