use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "eddy.log";

/// Candidate directories for the log file, most preferred first.
pub fn log_dirs() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = dirs::cache_dir()
        .map(|dir| dir.join("eddy"))
        .into_iter()
        .collect();
    candidates.push(PathBuf::from("."));
    candidates
}

/// Open `eddy.log` in append mode in the first directory that allows it.
pub fn open_log_file(candidates: &[PathBuf]) -> Option<(PathBuf, File)> {
    candidates.iter().find_map(|dir| {
        let path = dir.join(LOG_FILE_NAME);
        open_in(dir, &path).ok().map(|file| (path, file))
    })
}

fn open_in(dir: &Path, path: &Path) -> std::io::Result<File> {
    fs::create_dir_all(dir)?;
    fs::OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_usable_dir_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        let (path, _) =
            open_log_file(&[first.path().join("eddy"), second.path().to_path_buf()]).unwrap();

        assert_eq!(path, first.path().join("eddy").join(LOG_FILE_NAME));
        assert!(path.exists());
    }

    #[test]
    fn test_falls_back_when_preferred_dir_is_unusable() {
        let root = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocked = root.path().join("cache");
        fs::write(&blocked, "not a directory").unwrap();
        let fallback = root.path().join("fallback");

        let (path, _) = open_log_file(&[blocked.join("eddy"), fallback.clone()]).unwrap();

        assert_eq!(path, fallback.join(LOG_FILE_NAME));
    }

    #[test]
    fn test_no_usable_dir() {
        let root = tempfile::tempdir().unwrap();
        let blocked = root.path().join("file");
        fs::write(&blocked, "x").unwrap();

        assert!(open_log_file(&[blocked.join("a")]).is_none());
    }

    #[test]
    fn test_working_dir_is_last_resort() {
        assert_eq!(log_dirs().last(), Some(&PathBuf::from(".")));
    }
}
