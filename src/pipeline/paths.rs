//! Suffixes of the intermediate files, stored in the working directory as `<stem>.<suffix>`.

/// Mapping between representative and collapsed sequence ids, written by `derep`.
pub(super) const ID_MAPPING: &'static str = "id_mapping";
/// Mapping between sequence ids and samples, written by `derep`.
pub(super) const SAMPLE_MAPPING: &'static str = "sample_mapping";
/// Dereplicated sequences (standard output of `derep`).
pub(super) const DEREP: &'static str = "derep";
/// Sorted column distance matrix, written by `dmatrix`.
pub(super) const MATRIX: &'static str = "matrix";
/// Clustering results, written by `cluster`.
pub(super) const CLUST: &'static str = "clust";
