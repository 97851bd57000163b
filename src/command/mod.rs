//! Command-line interface: argument parsing, validation, and the pipeline run.

use std::{
    io::{self, Write},
    path::PathBuf,
};
use colored::Colorize;
use const_format::str_repeat;
use crate::{
    ext,
    err::{add_path, error, validate_param},
    pipeline::{self, Files, Method, Overrides, Params, ProcessRunner, Tool},
};

const PROGRAM: &'static str = env!("CARGO_PKG_NAME");

/// Legacy form of the mask argument (`-mask=X` or `-mask X`), rewritten into `--mask` before parsing.
const LEGACY_MASK: &'static str = "-mask";

struct Args {
    input: Option<PathBuf>,
    method: Option<String>,
    workdir: PathBuf,
    overrides: Overrides,
    tool: Tool,
    params: Params,
    timings: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: None,
            method: None,
            workdir: PathBuf::from("."),
            overrides: Default::default(),
            tool: Default::default(),
            params: Default::default(),
            timings: None,
        }
    }
}

impl Args {
    /// Checks arguments that do not require external executables.
    fn validate(mut self) -> crate::Result<Self> {
        validate_param!(self.input.is_some(), "Input FASTA file is not provided");
        let method = self.method.as_deref()
            .ok_or_else(|| error!(InvalidInput, "Clustering method is not provided"))?;
        self.params.method = Some(method.parse::<Method>().map_err(crate::Error::InvalidInput)?);

        // unwrap as input was checked to be Some.
        let input = self.input.as_ref().unwrap();
        validate_param!(input.is_file(), "Input FASTA file {} does not exist", ext::fmt::path(input));
        validate_param!(self.tool.jar.is_file(), "Cannot find {} (see --jar)", ext::fmt::path(&self.tool.jar));
        validate_param!(!self.workdir.is_file(), "Working directory {} is a file", ext::fmt::path(&self.workdir));

        if let Some(mask) = &self.params.mask {
            validate_param!(!mask.is_empty(), "Mask sequence id is empty");
        }
        validate_param!(is_heap_size(&self.tool.memory),
            "Cannot parse heap size `{}` (examples: 512m, 2g, 16G)", self.tool.memory);
        if let Some(cutoff) = self.params.dist_cutoff {
            validate_param!(0.0 <= cutoff && cutoff <= 1.0, "Distance cutoff ({}) must be within [0, 1]", cutoff);
        }
        if let Some(step) = self.params.step {
            validate_param!(0.0 < step && step <= 1.0, "Clustering step ({}) must be within (0, 1]", step);
        }
        Ok(self)
    }
}

/// Java heap size: a positive number with an optional k/m/g suffix.
fn is_heap_size(s: &str) -> bool {
    let digits = s.strip_suffix(|c: char| "kKmMgG".contains(c)).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) && digits.bytes().any(|b| b != b'0')
}

/// Print tool version and authors.
fn print_version() {
    println!("{} {}", PROGRAM.underline(), format!("v{}", env!("CARGO_PKG_VERSION")).green());
    let authors: Vec<_> = env!("CARGO_PKG_AUTHORS").split(':').collect();
    println!("Created by {}", authors.iter().map(|s| s.bright_blue().to_string()).collect::<Vec<_>>().join(", "));
}

fn print_usage() {
    println!("{} {} <fasta_file> <{}> [-mask=<maskseq>] [working_directory] [args]",
        "Usage:".bold(), PROGRAM, "single,upgma,complete".yellow());
}

fn print_help() {
    const KEY: usize = 20;
    const VAL: usize = 4;
    const EMPTY: &'static str = str_repeat!(" ", KEY + VAL + 5);

    let defaults = Args::default();
    println!("{}", "Dereplicate, compute distance matrix, and cluster sequences with the RDP clustering tool."
        .yellow());
    println!();
    print_usage();

    println!("\n{}", "Positional arguments:".bold());
    println!("    {:KEY$} {:VAL$}  Input FASTA file (aligned, unless a mask is provided).",
        "fasta_file".green(), "");
    println!("    {:KEY$} {:VAL$}  Clustering method: {}, {} or {}.",
        "method".green(), "", "single".yellow(), "upgma".yellow(), "complete".yellow());
    println!("    {:KEY$} {:VAL$}  Directory for intermediate files [{}].",
        "working_directory".green(), "", defaults.workdir.display());

    println!("\n{}", "Dereplication and clustering:".bold());
    println!("    {:KEY$} {:VAL$}  Compare sequences only at the columns of this model sequence.\n\
        {EMPTY}  Also accepted as {}.",
        "    --mask".green(), "STR".yellow(), "-mask=STR".green());
    println!("    {:KEY$} {:VAL$}  Only save distances below the cutoff (dmatrix -c).",
        "-c, --dist-cutoff".green(), "NUM".yellow());
    println!("    {:KEY$} {:VAL$}  Minimal number of comparable positions (dmatrix -l).",
        "-l, --min-overlap".green(), "INT".yellow());
    println!("    {:KEY$} {:VAL$}  Distance step between reported clusterings (cluster -S).",
        "-S, --step".green(), "NUM".yellow());

    println!("\n{}", "Intermediate files (default: working_directory/<stem>.<suffix>):".bold());
    println!("    {:KEY$} {:VAL$}  Id mapping file.", "    --id-mapping".green(), "FILE".yellow());
    println!("    {:KEY$} {:VAL$}  Sample mapping file.", "    --sample-mapping".green(), "FILE".yellow());
    println!("    {:KEY$} {:VAL$}  Dereplicated sequences.", "    --derep".green(), "FILE".yellow());
    println!("    {:KEY$} {:VAL$}  Distance matrix.", "    --matrix".green(), "FILE".yellow());
    println!("    {:KEY$} {:VAL$}  Clustering output.", "    --clust".green(), "FILE".yellow());
    println!("    {:KEY$} {:VAL$}  Write stage durations (in seconds) to a JSON file.",
        "    --timings".green(), "FILE".yellow());

    println!("\n{}", "Execution parameters:".bold());
    println!("    {:KEY$} {:VAL$}  Java executable [{}].",
        "    --java".green(), "EXE".yellow(), defaults.tool.java.display());
    println!("    {:KEY$} {:VAL$}  Clustering tool [{}].",
        "    --jar".green(), "FILE".yellow(), defaults.tool.jar.display());
    println!("    {:KEY$} {:VAL$}  Maximal Java heap size [{}].",
        "    --memory".green(), "STR".yellow(), defaults.tool.memory);

    println!("\n{}", "Other parameters:".bold());
    println!("    {:KEY$} {:VAL$}  Show this help message.", "-h, --help".green(), "");
    println!("    {:KEY$} {:VAL$}  Show version.", "-V, --version".green(), "");
}

/// Replaces `-mask=X` with `--mask=X` and `-mask` with `--mask`, so that they are not split into short flags.
fn normalize_argv(argv: &[String]) -> Vec<String> {
    argv.iter()
        .map(|arg| match arg.strip_prefix(LEGACY_MASK) {
            Some("") => "--mask".to_owned(),
            Some(rest) if rest.starts_with('=') => format!("-{}", arg),
            _ => arg.clone(),
        })
        .collect()
}

fn parse_args(argv: &[String]) -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;
    let mut args = Args::default();
    let mut parser = lexopt::Parser::from_args(normalize_argv(argv));
    let mut positional = 0;

    while let Some(arg) = parser.next()? {
        match arg {
            Long("mask") => args.params.mask = Some(parser.value()?.parse()?),
            Short('c') | Long("dist-cutoff") => args.params.dist_cutoff = Some(parser.value()?.parse()?),
            Short('l') | Long("min-overlap") => args.params.min_overlap = Some(parser.value()?.parse()?),
            Short('S') | Long("step") => args.params.step = Some(parser.value()?.parse()?),

            Long("id-mapping") => args.overrides.id_mapping = Some(parser.value()?.parse()?),
            Long("sample-mapping") => args.overrides.sample_mapping = Some(parser.value()?.parse()?),
            Long("derep") => args.overrides.derep = Some(parser.value()?.parse()?),
            Long("matrix") => args.overrides.matrix = Some(parser.value()?.parse()?),
            Long("clust") => args.overrides.clust = Some(parser.value()?.parse()?),
            Long("timings") => args.timings = Some(parser.value()?.parse()?),

            Long("java") => args.tool.java = parser.value()?.parse()?,
            Long("jar") => args.tool.jar = parser.value()?.parse()?,
            Long("memory") => args.tool.memory = parser.value()?.parse()?,

            Short('V') | Long("version") => {
                print_version();
                std::process::exit(0);
            }
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Value(val) => {
                match positional {
                    0 => args.input = Some(val.into()),
                    1 => args.method = Some(val.string()?),
                    2 => args.workdir = val.into(),
                    _ => return Err(lexopt::Error::UnexpectedArgument(val)),
                }
                positional += 1;
            }
            _ => Err(arg.unexpected())?,
        }
    }
    Ok(args)
}

pub fn run(argv: &[String]) -> crate::Result<()> {
    if argv.is_empty() {
        print_help();
        std::process::exit(1);
    }
    let args = parse_args(argv)?;
    if args.input.is_none() || args.method.is_none() {
        print_usage();
        std::process::exit(1);
    }
    let mut args = args.validate()?;
    args.tool.java = ext::sys::find_exe(&args.tool.java)?;
    ext::sys::mkdir(&args.workdir).map_err(add_path!(args.workdir))?;

    // unwrap as args.input was previously checked to be Some.
    let files = Files::new(args.input.as_ref().unwrap(), &args.workdir, args.overrides.clone());
    log::debug!("Intermediate files:");
    for path in files.outputs() {
        log::debug!("    {}", ext::fmt::path(path));
    }

    let timings = pipeline::run(&args.tool, &files, &args.params, &mut ProcessRunner)?;
    let mut out = io::stdout().lock();
    timings.write_summary(&mut out).and_then(|()| out.flush()).map_err(add_path!(!))?;
    if let Some(path) = &args.timings {
        timings.save(path)?;
    }
    log::info!("Success! Clusters are written to {}", ext::fmt::path(&files.clust));
    Ok(())
}
