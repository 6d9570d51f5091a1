use std::path::{Path, PathBuf};

use crate::scaffold::ScaffoldId;

/// What every extraction step needs to know: which scaffold, and where its
/// files go.
#[derive(Debug, Clone)]
pub struct Selection {
    scaffold: ScaffoldId,
    out_dir: PathBuf,
}

impl Selection {
    /// Places the `scaffold_<N>_info` directory under `base`.
    pub fn new(scaffold: ScaffoldId, base: &Path) -> Self {
        let out_dir = base.join(scaffold.info_dir_name());
        Self { scaffold, out_dir }
    }

    pub fn scaffold(&self) -> &ScaffoldId {
        &self.scaffold
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn fasta_output(&self) -> PathBuf {
        self.out_dir.join(format!("{}.fasta", self.scaffold.name()))
    }

    pub fn te_output(&self) -> PathBuf {
        self.out_dir.join(format!("TEs_{}.gff", self.scaffold.name()))
    }

    pub fn genome_output(&self) -> PathBuf {
        self.out_dir
            .join(format!("{}_secreted.gff", self.scaffold.name()))
    }
}
