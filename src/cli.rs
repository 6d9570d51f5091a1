use std::{ffi::OsString, path::PathBuf, sync::LazyLock};

use clap::{CommandFactory, FromArgMatches, Parser};
use regex::Regex;
use thiserror::Error;

use crate::scaffold::{InvalidScaffoldNumber, ScaffoldId};

static FASTA_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+\.(fasta|txt)$").expect("valid regex"));
static GFF_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+\.gff$").expect("valid regex"));

/// Select everything known about one scaffold: its sequence, its
/// transposable elements and its genome annotation.
///
/// Results are written to scaffold_<N>_info/ in the current directory.
#[derive(Parser, Debug)]
#[command(author, about, disable_version_flag = true, args_override_self = true)]
pub struct Cli {
    /// a FASTA-formatted file (.fasta or .txt)
    #[arg(short = 'f', long = "fasta_path", value_name = "FILE")]
    fasta_path: Option<String>,

    /// transposable element annotation (.gff)
    #[arg(short = 't', long = "te_path", value_name = "FILE")]
    te_path: Option<String>,

    /// genome feature annotation (.gff)
    #[arg(short = 'g', long = "gen_path", value_name = "FILE")]
    gen_path: Option<String>,

    /// number N of the scaffold, as in scaffold_N
    #[arg(short = 'n', long = "scaffold_number", value_name = "N")]
    scaffold_number: Option<String>,

    /// report progress on stderr
    #[arg(long = "verbose", default_value_t = false)]
    pub verbose: bool,

    // Checked options in the order they appeared on the command line.
    #[arg(skip)]
    given: Vec<Checked>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Checked {
    Fasta,
    Te,
    Gen,
    Scaffold,
}

impl Checked {
    const ALL: [Checked; 4] = [Checked::Fasta, Checked::Te, Checked::Gen, Checked::Scaffold];

    fn id(self) -> &'static str {
        match self {
            Checked::Fasta => "fasta_path",
            Checked::Te => "te_path",
            Checked::Gen => "gen_path",
            Checked::Scaffold => "scaffold_number",
        }
    }
}

/// The validated inputs of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub fasta_path: PathBuf,
    pub te_path: PathBuf,
    pub gen_path: PathBuf,
    pub scaffold: ScaffoldId,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("-f isn't a fasta or txt file")]
    FastaPath,
    #[error("-t isn't a gff file")]
    TePath,
    #[error("-g isn't a gff file")]
    GenPath,
    #[error("-n isn't a number")]
    ScaffoldNumber(#[from] InvalidScaffoldNumber),
    #[error("missing arguments -f, -t, -g or -n")]
    Missing,
}

impl UsageError {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            UsageError::FastaPath => 3,
            UsageError::TePath => 4,
            UsageError::GenPath => 5,
            UsageError::ScaffoldNumber(_) => 6,
            UsageError::Missing => 7,
        }
    }
}

impl Cli {
    /// Parses `argv` and records the order the checked options came in.
    /// A repeated option keeps its last value.
    pub fn try_parse_ordered<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(argv)?;
        let mut cli = Self::from_arg_matches(&matches)?;

        let mut given: Vec<(usize, Checked)> = Checked::ALL
            .into_iter()
            .filter_map(|checked| matches.index_of(checked.id()).map(|i| (i, checked)))
            .collect();
        given.sort_by_key(|(index, _)| *index);
        cli.given = given.into_iter().map(|(_, checked)| checked).collect();
        Ok(cli)
    }

    /// Checks each given value in command-line order, then that all four
    /// were given.
    pub fn validate(&self) -> Result<Args, UsageError> {
        for checked in self.given.iter().chain(Checked::ALL.iter()) {
            self.check(*checked)?;
        }

        match (
            &self.fasta_path,
            &self.te_path,
            &self.gen_path,
            &self.scaffold_number,
        ) {
            (Some(fasta_path), Some(te_path), Some(gen_path), Some(scaffold)) => Ok(Args {
                fasta_path: PathBuf::from(fasta_path),
                te_path: PathBuf::from(te_path),
                gen_path: PathBuf::from(gen_path),
                scaffold: scaffold.parse::<ScaffoldId>()?,
            }),
            _ => Err(UsageError::Missing),
        }
    }

    fn check(&self, checked: Checked) -> Result<(), UsageError> {
        match checked {
            Checked::Fasta => {
                check_name(self.fasta_path.as_deref(), &FASTA_NAME, UsageError::FastaPath)
            }
            Checked::Te => check_name(self.te_path.as_deref(), &GFF_NAME, UsageError::TePath),
            Checked::Gen => check_name(self.gen_path.as_deref(), &GFF_NAME, UsageError::GenPath),
            Checked::Scaffold => match self.scaffold_number.as_deref() {
                Some(number) => number.parse::<ScaffoldId>().map(|_| ()).map_err(Into::into),
                None => Ok(()),
            },
        }
    }
}

fn check_name(value: Option<&str>, pattern: &Regex, err: UsageError) -> Result<(), UsageError> {
    match value {
        Some(path) if !pattern.is_match(path) => Err(err),
        _ => Ok(()),
    }
}
