use std::{
    io::{self, Write, BufWriter},
    fs::{self, File},
    path::{Path, PathBuf},
};
use crate::{Error, err::add_path};

/// Finds an executable, and returns Error, if executable is not available.
pub fn find_exe(p: impl AsRef<Path>) -> Result<PathBuf, Error> {
    which::which(p.as_ref()).map_err(|_| Error::NoExec(p.as_ref().to_owned()))
}

/// Creates a buffered file.
pub fn create(filename: &Path) -> crate::Result<BufWriter<File>> {
    File::create(filename).map(BufWriter::new).map_err(add_path!(filename))
}

/// Writes the whole contents to the file, and flushes it.
pub fn write_all(filename: &Path, contents: &[u8]) -> crate::Result<()> {
    let mut f = create(filename)?;
    f.write_all(contents).map_err(add_path!(filename))?;
    f.flush().map_err(add_path!(filename))
}

/// Create directory (and all its parents), if it does not exist yet.
pub fn mkdir(path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mkdir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");
        mkdir(&dir).unwrap();
        assert!(dir.is_dir());
        // Second call is a no-op.
        mkdir(&dir).unwrap();
    }

    #[test]
    fn missing_exe() {
        match find_exe("definitely-not-an-executable-4e1f") {
            Err(Error::NoExec(p)) => assert_eq!(p, PathBuf::from("definitely-not-an-executable-4e1f")),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn write_all_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let filename = tmp.path().join("missing").join("out.json");
        match write_all(&filename, b"{}") {
            Err(Error::Io(_, paths)) => assert_eq!(paths, vec![filename]),
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
