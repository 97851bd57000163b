use std::{
    io::{self, Write},
    path::Path,
    time::Duration,
};
use crate::ext;

/// Wall-clock time, spent on each stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timings {
    pub derep: Duration,
    pub matrix: Duration,
    pub cluster: Duration,
    pub total: Duration,
}

impl Timings {
    /// Pairs `(name, duration)` in the order derep, matrix, cluster, total.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Duration)> {
        [("derep", self.derep), ("matrix", self.matrix), ("cluster", self.cluster), ("total", self.total)]
            .into_iter()
    }

    /// Writes `name<TAB>seconds` lines.
    pub fn write_summary(&self, mut f: impl Write) -> io::Result<()> {
        for (name, duration) in self.iter() {
            writeln!(f, "{}\t{:.3}", name, duration.as_secs_f64())?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> json::JsonValue {
        let mut obj = json::JsonValue::new_object();
        for (name, duration) in self.iter() {
            obj[name] = duration.as_secs_f64().into();
        }
        obj
    }

    /// Saves timings in a JSON file.
    pub fn save(&self, filename: &Path) -> crate::Result<()> {
        let s = json::stringify_pretty(self.to_json(), 4);
        ext::sys::write_all(filename, s.as_bytes())
            .map_err(|e| crate::Error::JsonSave(e.display()))?;
        log::debug!("Timings saved to {}", ext::fmt::path(filename));
        Ok(())
    }
}
