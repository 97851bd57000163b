use std::path::{Path, PathBuf};
use super::paths;

/// Returns everything in the input filename before the first dot.
pub fn file_stem(fasta: &Path) -> String {
    match fasta.file_name() {
        Some(name) => name.to_string_lossy().split('.').next().unwrap_or_default().to_owned(),
        None => String::new(),
    }
}

/// User-provided replacements for the default intermediate filenames.
#[derive(Default, Clone, Debug)]
pub struct Overrides {
    pub id_mapping: Option<PathBuf>,
    pub sample_mapping: Option<PathBuf>,
    pub derep: Option<PathBuf>,
    pub matrix: Option<PathBuf>,
    pub clust: Option<PathBuf>,
}

/// Files, passed between the stages of the external tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Files {
    pub fasta: PathBuf,
    pub workdir: PathBuf,
    pub id_mapping: PathBuf,
    pub sample_mapping: PathBuf,
    pub derep: PathBuf,
    pub matrix: PathBuf,
    pub clust: PathBuf,
}

impl Files {
    /// Each file without an override is placed into `workdir/<stem>.<suffix>`.
    pub fn new(fasta: &Path, workdir: &Path, overrides: Overrides) -> Self {
        let stem = file_stem(fasta);
        let default = |suffix: &str| workdir.join(format!("{}.{}", stem, suffix));
        Self {
            fasta: fasta.to_owned(),
            workdir: workdir.to_owned(),
            id_mapping: overrides.id_mapping.unwrap_or_else(|| default(paths::ID_MAPPING)),
            sample_mapping: overrides.sample_mapping.unwrap_or_else(|| default(paths::SAMPLE_MAPPING)),
            derep: overrides.derep.unwrap_or_else(|| default(paths::DEREP)),
            matrix: overrides.matrix.unwrap_or_else(|| default(paths::MATRIX)),
            clust: overrides.clust.unwrap_or_else(|| default(paths::CLUST)),
        }
    }

    /// Outputs in the order they are produced.
    pub fn outputs(&self) -> [&Path; 5] {
        [&self.id_mapping, &self.sample_mapping, &self.derep, &self.matrix, &self.clust]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("reads.fa", "reads")]
    #[case("data/reads.aligned.fa", "reads")]
    #[case("/abs/path/sample_1.fasta.gz", "sample_1")]
    #[case("nodots", "nodots")]
    #[case(".hidden.fa", "")]
    fn stems(#[case] fasta: &str, #[case] expected: &str) {
        assert_eq!(file_stem(Path::new(fasta)), expected);
    }

    #[test]
    fn default_files() {
        let files = Files::new(Path::new("data/16s.aligned.fa"), Path::new("work"), Overrides::default());
        assert_eq!(files.id_mapping, PathBuf::from("work/16s.id_mapping"));
        assert_eq!(files.sample_mapping, PathBuf::from("work/16s.sample_mapping"));
        assert_eq!(files.derep, PathBuf::from("work/16s.derep"));
        assert_eq!(files.matrix, PathBuf::from("work/16s.matrix"));
        assert_eq!(files.clust, PathBuf::from("work/16s.clust"));
        assert_eq!(files.fasta, PathBuf::from("data/16s.aligned.fa"));
    }

    #[test]
    fn current_dir_is_joined() {
        let files = Files::new(Path::new("seqs.fa"), Path::new("."), Overrides::default());
        assert_eq!(files.derep, Path::new(".").join("seqs.derep"));
    }

    #[test]
    fn overrides_replace_single_files() {
        let overrides = Overrides {
            matrix: Some(PathBuf::from("/scratch/big.matrix")),
            clust: Some(PathBuf::from("result.txt")),
            ..Default::default()
        };
        let files = Files::new(Path::new("seqs.fa"), Path::new("work"), overrides);
        assert_eq!(files.matrix, PathBuf::from("/scratch/big.matrix"));
        assert_eq!(files.clust, PathBuf::from("result.txt"));
        assert_eq!(files.derep, PathBuf::from("work/seqs.derep"));
        assert_eq!(files.outputs().len(), 5);
    }
}
