use std::{
    fmt,
    str::FromStr,
};

/// Linkage used by the external `cluster` subcommand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Single,
    Upgma,
    Complete,
}

impl Method {
    pub const ALL: [Self; 3] = [Self::Single, Self::Upgma, Self::Complete];

    /// Name, passed to `cluster -m`.
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Upgma => "upgma",
            Self::Complete => "complete",
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
            .find(|method| method.to_str() == s)
            .ok_or_else(|| format!("Unknown clustering method `{}`. Valid methods are single, upgma, or complete", s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}
