//! Dereplication, distance matrix and clustering, executed one after another by the external tool.

pub mod files;
pub mod method;
pub mod timing;
pub mod tool;
mod paths;

use std::time::Instant;
use crate::{
    ext,
    err::error,
};
pub use files::{Files, Overrides};
pub use method::Method;
pub use timing::Timings;
pub use tool::{Tool, Invocation, Exit, Runner, ProcessRunner};

/// Parameters, passed to the external tool.
#[derive(Clone, Debug, Default)]
pub struct Params {
    pub method: Option<Method>,
    /// Dereplicate using the columns of this model sequence instead of all aligned columns.
    pub mask: Option<String>,
    /// `dmatrix -c`: only save distances below the cutoff.
    pub dist_cutoff: Option<f64>,
    /// `dmatrix -l`: minimal number of comparable positions.
    pub min_overlap: Option<u32>,
    /// `cluster -S`: distance step between reported clusterings.
    pub step: Option<f64>,
}

/// Stages of the pipeline, in the execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Derep,
    Matrix,
    Cluster,
}

impl Stage {
    /// Subcommand of the external tool.
    pub const fn subcommand(self) -> &'static str {
        match self {
            Self::Derep => "derep",
            Self::Matrix => "dmatrix",
            Self::Cluster => "cluster",
        }
    }

    const fn finished(self) -> &'static str {
        match self {
            Self::Derep => "Dereplication completed",
            Self::Matrix => "Distance matrix computed",
            Self::Cluster => "Clustering completed",
        }
    }
}

/// `derep [--aligned | --model-only=<mask>] <id_mapping> <sample_mapping> <fasta>`, stdout goes to the derep file.
pub fn derep_invocation(tool: &Tool, files: &Files, params: &Params) -> Invocation {
    let mut invocation = tool.invocation(Stage::Derep.subcommand());
    match &params.mask {
        Some(mask) => invocation.arg(format!("--model-only={}", mask)),
        None => invocation.arg("--aligned"),
    };
    invocation.arg(&files.id_mapping).arg(&files.sample_mapping).arg(&files.fasta)
        .stdout_to(&files.derep);
    invocation
}

/// `dmatrix -i <id_mapping> -o <matrix> -in <derep> -w <workdir> [-c <cutoff>] [-l <overlap>]`.
pub fn matrix_invocation(tool: &Tool, files: &Files, params: &Params) -> Invocation {
    let mut invocation = tool.invocation(Stage::Matrix.subcommand());
    invocation
        .arg("-i").arg(&files.id_mapping)
        .arg("-o").arg(&files.matrix)
        .arg("-in").arg(&files.derep)
        .arg("-w").arg(&files.workdir);
    if let Some(cutoff) = params.dist_cutoff {
        invocation.arg("-c").arg(cutoff.to_string());
    }
    if let Some(overlap) = params.min_overlap {
        invocation.arg("-l").arg(overlap.to_string());
    }
    invocation
}

/// `cluster -m <method> -i <id_mapping> -s <sample_mapping> -d <matrix> -o <clust> [-S <step>]`.
pub fn cluster_invocation(tool: &Tool, files: &Files, method: Method, params: &Params) -> Invocation {
    let mut invocation = tool.invocation(Stage::Cluster.subcommand());
    invocation
        .arg("-m").arg(method.to_str())
        .arg("-i").arg(&files.id_mapping)
        .arg("-s").arg(&files.sample_mapping)
        .arg("-d").arg(&files.matrix)
        .arg("-o").arg(&files.clust);
    if let Some(step) = params.step {
        invocation.arg("-S").arg(step.to_string());
    }
    invocation
}

/// Runs one stage and returns its duration. Non-zero exit status stops the pipeline.
fn run_stage(stage: Stage, invocation: &Invocation, runner: &mut impl Runner) -> crate::Result<std::time::Duration> {
    let timer = Instant::now();
    let exit = runner.run(invocation)?;
    let elapsed = timer.elapsed();
    if !exit.success() {
        return Err(error!(Subprocess, "`{}` failed with {} after {}\n    {}",
            stage.subcommand(), exit, ext::fmt::Duration(elapsed), invocation));
    }
    log::info!("{} in {}", stage.finished(), ext::fmt::Duration(elapsed));
    Ok(elapsed)
}

/// Runs derep, dmatrix and cluster, each waiting for the previous one.
pub fn run(
    tool: &Tool,
    files: &Files,
    params: &Params,
    runner: &mut impl Runner,
) -> crate::Result<Timings>
{
    let timer = Instant::now();
    let method = params.method.ok_or_else(|| error!(InvalidInput,
        "Clustering method is not provided. Valid methods are single, upgma, or complete"))?;
    let mut timings = Timings::default();

    log::info!("Dereplicating {}", ext::fmt::path(&files.fasta));
    timings.derep = run_stage(Stage::Derep, &derep_invocation(tool, files, params), runner)?;
    log::info!("Computing distance matrix");
    timings.matrix = run_stage(Stage::Matrix, &matrix_invocation(tool, files, params), runner)?;
    log::info!("Clustering ({})", method);
    timings.cluster = run_stage(Stage::Cluster, &cluster_invocation(tool, files, method, params), runner)?;

    timings.total = timer.elapsed();
    log::info!("Completed in {}", ext::fmt::Duration(timings.total));
    Ok(timings)
}
