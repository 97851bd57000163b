use std::{
    fmt::{self, Display, Debug},
    path::{Path, PathBuf},
    ffi::OsStr,
};

/// Pretty path formatting: replace $HOME with ~, put quotes around if needed.
pub fn path(path: &Path) -> String {
    lazy_static::lazy_static!{
        static ref HOME: Option<PathBuf> = std::env::var_os("HOME").map(|s| PathBuf::from(s));
    }
    if let Some(home) = (*HOME).as_ref() {
        if let Ok(suffix) = path.strip_prefix(home) {
            let tilde_path = Path::new("~").join(suffix);
            return quote(&tilde_path.to_string_lossy());
        }
    }
    quote(&path.to_string_lossy())
}

fn quote(s: &str) -> String {
    if s.contains(char::is_whitespace) { format!("'{}'", s) } else { s.to_owned() }
}

/// Converts command into a string, removing quotes if argument has no whitespace, and replacing HOME with ~.
pub fn args<'a>(program: &'a OsStr, arguments: impl IntoIterator<Item = &'a OsStr>) -> String {
    std::iter::once(program)
        .chain(arguments)
        .map(OsStr::as_ref)
        .map(path)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats duration as `HH:MM:SS.SSS`.
pub struct Duration(pub std::time::Duration);

impl Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const IN_HOUR: u64 = 3600;
        const IN_MINUTE: u64 = 60;
        let mut seconds = self.0.as_secs();
        write!(f, "{}:", seconds / IN_HOUR)?;
        seconds %= IN_HOUR;
        write!(f, "{:02}:", seconds / IN_MINUTE)?;
        seconds %= IN_MINUTE;
        write!(f, "{:02}.{:03}", seconds, self.0.subsec_millis())?;
        Ok(())
    }
}

impl Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, "0:00:00.000")]
    #[case(59, 999, "0:00:59.999")]
    #[case(61, 5, "0:01:01.005")]
    #[case(3 * 3600 + 25 * 60 + 7, 120, "3:25:07.120")]
    fn duration_display(#[case] secs: u64, #[case] millis: u32, #[case] expected: &str) {
        let d = std::time::Duration::new(secs, millis * 1_000_000);
        assert_eq!(Duration(d).to_string(), expected);
    }

    #[test]
    fn whitespace_is_quoted() {
        assert_eq!(path(Path::new("data/my reads.fa")), "'data/my reads.fa'");
        assert_eq!(path(Path::new("data/reads.fa")), "data/reads.fa");
    }

    #[test]
    fn command_is_joined() {
        let arguments = ["-Xmx2g", "-jar", "lib/my tools/Clustering.jar", "derep"];
        assert_eq!(args(OsStr::new("java"), arguments.iter().map(OsStr::new)),
            "java -Xmx2g -jar 'lib/my tools/Clustering.jar' derep");
    }
}
