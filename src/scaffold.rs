use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));
static SCAFFOLD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(scaffold_\d+)").expect("valid regex"));

/// A scaffold number that has been checked to consist of ASCII digits only.
///
/// The digits are kept verbatim, so `007` names `scaffold_007`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a scaffold number")]
pub struct InvalidScaffoldNumber(pub String);

impl FromStr for ScaffoldId {
    type Err = InvalidScaffoldNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if DIGITS.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidScaffoldNumber(s.to_string()))
        }
    }
}

impl fmt::Display for ScaffoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.number())
    }
}

impl ScaffoldId {
    pub fn number(&self) -> &str {
        &self.0
    }

    /// Sequence identifier used by the FASTA and genome files, `scaffold_<N>`.
    pub fn name(&self) -> String {
        format!("scaffold_{}", self.0)
    }

    /// Sequence identifier used by the transposable element annotation.
    pub fn te_contig(&self) -> String {
        format!("scaffold_{}_c1", self.0)
    }

    pub fn info_dir_name(&self) -> String {
        format!("scaffold_{}_info", self.0)
    }
}

/// Pulls the `scaffold_<N>` part out of a sequence identifier such as
/// `scaffold_12_c1`.
pub fn scaffold_name_in(seq_id: &str) -> Option<&str> {
    SCAFFOLD_NAME.find(seq_id).map(|m| m.as_str())
}
