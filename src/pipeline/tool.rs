//! External clustering tool and the way it is started.

use std::{
    fmt,
    fs::File,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};
use crate::{
    ext,
    err::add_path,
};

/// Packaged executable, started as `java -Xmx<memory> -jar <jar> <subcommand> ...`.
#[derive(Clone, Debug)]
pub struct Tool {
    pub java: PathBuf,
    /// Maximal heap size, for example `2g`.
    pub memory: String,
    pub jar: PathBuf,
}

impl Default for Tool {
    fn default() -> Self {
        Self {
            java: PathBuf::from("java"),
            memory: "2g".to_owned(),
            jar: PathBuf::from("Clustering.jar"),
        }
    }
}

impl Tool {
    /// Starts a new invocation of the subcommand, remaining arguments are added by the caller.
    pub fn invocation(&self, subcommand: &'static str) -> Invocation {
        let mut invocation = Invocation {
            subcommand,
            program: self.java.clone(),
            args: Vec::new(),
            tool_start: 3,
            stdout: None,
        };
        invocation.arg(format!("-Xmx{}", self.memory)).arg("-jar").arg(&self.jar).arg(subcommand);
        invocation
    }
}

/// Single call of the external tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub subcommand: &'static str,
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Index of the subcommand in `args`.
    pub tool_start: usize,
    /// Standard output is redirected to this file, if present.
    pub stdout: Option<PathBuf>,
}

impl Invocation {
    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    pub fn stdout_to(&mut self, path: &Path) -> &mut Self {
        self.stdout = Some(path.to_owned());
        self
    }

    /// Arguments after `-jar <jar>`, starting with the subcommand itself.
    pub fn tool_args(&self) -> &[OsString] {
        &self.args[self.tool_start.min(self.args.len())..]
    }

    /// Creates a command without the stdout redirection.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&ext::fmt::args(self.program.as_os_str(), self.args.iter().map(OsString::as_os_str)))?;
        if let Some(path) = &self.stdout {
            write!(f, " > {}", ext::fmt::path(path))?;
        }
        Ok(())
    }
}

/// How a subprocess finished: `None` if it was terminated by a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exit(pub Option<i32>);

impl Exit {
    pub const SUCCESS: Self = Self(Some(0));

    pub fn success(self) -> bool {
        self == Self::SUCCESS
    }
}

impl From<ExitStatus> for Exit {
    fn from(status: ExitStatus) -> Self {
        Self(status.code())
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Executes invocations one by one, waiting for each of them to finish.
pub trait Runner {
    fn run(&mut self, invocation: &Invocation) -> crate::Result<Exit>;
}

/// Starts real subprocesses. Standard input and standard error are inherited.
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> crate::Result<Exit> {
        let mut cmd = invocation.to_command();
        if let Some(path) = &invocation.stdout {
            // File is closed together with `cmd`, right after the process exits.
            let file = File::create(path).map_err(add_path!(path))?;
            cmd.stdout(Stdio::from(file));
        }
        log::debug!("    {}", invocation);
        let status = cmd.status().map_err(add_path!(invocation.program))?;
        Ok(Exit::from(status))
    }
}
