// crates/lightbox-media/src/relocate.rs
//
// File relocation for the sorting keys: move (delete-to-trash, move-to-slot)
// and copy (copy-to-slot). Both refuse to overwrite an existing file in the
// destination, so a mis-keyed sort never clobbers earlier work.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum RelocateError {
    /// The destination already holds a file with this name.
    AlreadyExists(PathBuf),
    Io(io::Error),
}

impl fmt::Display for RelocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists(p) => write!(f, "{} already exists", p.display()),
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RelocateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AlreadyExists(_) => None,
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for RelocateError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

fn destination_for(src: &Path, dest_dir: &Path) -> Result<PathBuf, RelocateError> {
    let name = src.file_name().ok_or_else(|| {
        RelocateError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", src.display()),
        ))
    })?;
    fs::create_dir_all(dest_dir)?;
    let dest = dest_dir.join(name);
    if dest.exists() {
        return Err(RelocateError::AlreadyExists(dest));
    }
    Ok(dest)
}

/// Move `src` into `dest_dir`, creating the directory if needed.
///
/// Tries a rename first; when that fails (typically a cross-device move,
/// e.g. sorting to another mount) falls back to copy-then-remove. On any
/// error the source file is left in place. Returns the new path.
pub fn relocate(src: &Path, dest_dir: &Path) -> Result<PathBuf, RelocateError> {
    let dest = destination_for(src, dest_dir)?;
    if fs::rename(src, &dest).is_err() {
        fs::copy(src, &dest)?;
        fs::remove_file(src)?;
    }
    Ok(dest)
}

/// Copy `src` into `dest_dir`, creating the directory if needed.
/// The source is untouched. Returns the new path.
pub fn copy_to(src: &Path, dest_dir: &Path) -> Result<PathBuf, RelocateError> {
    let dest = destination_for(src, dest_dir)?;
    fs::copy(src, &dest)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn relocate_moves_the_file_and_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("cat.png");
        touch(&src, "pixels");

        let dest_dir = dir.path().join("sorted").join("a");
        let dest = relocate(&src, &dest_dir).unwrap();

        assert_eq!(dest, dest_dir.join("cat.png"));
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "pixels");
    }

    #[test]
    fn relocate_refuses_to_overwrite_and_leaves_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("cat.png");
        touch(&src, "new");

        let dest_dir = dir.path().join("sorted");
        fs::create_dir_all(&dest_dir).unwrap();
        touch(&dest_dir.join("cat.png"), "old");

        match relocate(&src, &dest_dir) {
            Err(RelocateError::AlreadyExists(p)) => assert_eq!(p, dest_dir.join("cat.png")),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
        assert!(src.exists());
        assert_eq!(fs::read_to_string(dest_dir.join("cat.png")).unwrap(), "old");
    }

    #[test]
    fn copy_to_keeps_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("dog.png");
        touch(&src, "pixels");

        let dest = copy_to(&src, &dir.path().join("dup")).unwrap();
        assert!(src.exists());
        assert_eq!(fs::read_to_string(dest).unwrap(), "pixels");
    }
}
