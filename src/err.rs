use std::{
    io,
    fmt::Write,
    path::PathBuf,
};
use colored::Colorize;
use crate::ext;

/// General enum, representing possible errors.
#[derive(Debug)]
pub enum Error {
    Io(io::Error, Vec<PathBuf>),
    /// Error, produced by an argument parser.
    Lexopt(lexopt::Error),
    /// Executable not found.
    NoExec(PathBuf),
    /// External tool failed or could not be started.
    Subprocess(String),
    InvalidInput(String),
    /// Could not save JSON output.
    JsonSave(String),
}

impl From<lexopt::Error> for Error {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}

impl Error {
    /// Format error message.
    pub fn display(&self) -> String {
        let mut s = String::new();
        match self {
            Self::Io(e, files) => {
                write!(s, "{} in relation to ", "Input/Output error".red()).unwrap();
                if files.is_empty() {
                    write!(s, "unnamed streams").unwrap();
                } else {
                    write!(s, "{}", files.iter().map(|f| ext::fmt::path(f).cyan().to_string())
                        .collect::<Vec<_>>().join(", ")).unwrap();
                }
                write!(s, ": {}", e.kind()).unwrap();
                if let Some(e2) = e.get_ref() {
                    write!(s, ", {}", e2).unwrap();
                }
            }
            Self::Lexopt(e) => write!(s, "{} to parse command-line arguments: {}", "Failed".red(), e).unwrap(),
            Self::NoExec(path) => write!(s, "{} at {}", "Could not find executable".red(),
                ext::fmt::path(path).cyan()).unwrap(),
            Self::Subprocess(e) => write!(s, "{}:\n{}", "Subprocess error".red(), e).unwrap(),
            Self::InvalidInput(e) => write!(s, "{}: {}", "Invalid input".red(), e).unwrap(),
            Self::JsonSave(e) => write!(s, "{}: {}", "Could not save JSON".red(), e).unwrap(),
        };
        s
    }
}

macro_rules! validate_param {
    ($cond:expr, $($arg:expr),+) => {{
        if !($cond) {
            (
                Err($crate::Error::InvalidInput(format!($($arg),+)))
            ?)
        }
    }};
}
pub(crate) use validate_param;

macro_rules! add_path {
    (!) => {
        |e| $crate::Error::Io(e, Vec::new())
    };
    ($path:expr) => {
        |e| $crate::Error::Io(e, vec![std::convert::AsRef::<std::path::Path>::as_ref(&$path).to_owned()])
    };
    ($($path:expr),+) => {
        |e| {
            let mut v = Vec::new();
            $(
                v.push(std::convert::AsRef::<std::path::Path>::as_ref(&$path).to_owned());
            )*
            $crate::Error::Io(e, v)
        }
    };
}
pub(crate) use add_path;

macro_rules! error {
    ($var:ident, $($arg:expr),+ $(,)?) => {
        $crate::Error::$var(format!($($arg),+))
    }
}
pub(crate) use error;

/// Wrapper around the standard result.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn check_positive(x: i32) -> Result<i32> {
        validate_param!(x > 0, "Value ({}) must be positive", x);
        Ok(x)
    }

    #[test]
    fn validate_param_returns_invalid_input() {
        assert_eq!(check_positive(3).unwrap(), 3);
        match check_positive(-1) {
            Err(Error::InvalidInput(msg)) => assert_eq!(msg, "Value (-1) must be positive"),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn add_path_keeps_all_paths() {
        let f = add_path!("a.txt", "b.txt");
        match f(io::Error::from(io::ErrorKind::NotFound)) {
            Error::Io(e, paths) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(paths, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn display_mentions_subprocess() {
        let e = error!(Subprocess, "`{}` failed", "dmatrix");
        colored::control::set_override(false);
        assert_eq!(e.display(), "Subprocess error:\n`dmatrix` failed");
    }
}
