use std::{path::Path, process};

use clap::error::ErrorKind;

mod annotations;
mod cli;
mod error;
mod scaffold;
mod selection;
mod sequences;

use anyhow::Result;
use cli::{Args, Cli};
use error::SelectError;
use selection::Selection;

/// Initializes the logger; 1 shows warnings, 2 adds progress.
fn init_log(verbosity: usize) -> Result<()> {
    stderrlog::new()
        .module(module_path!())
        .quiet(false)
        .verbosity(verbosity)
        .timestamp(stderrlog::Timestamp::Off)
        .init()?;
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments; help and malformed flags end the run here.
    let cli = match Cli::try_parse_ordered(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            print!("{}", e.render());
            process::exit(2);
        }
        Err(e) => {
            println!("{}", e.render());
            process::exit(1);
        }
    };
    init_log(if cli.verbose { 2 } else { 1 })?;

    let args = match cli.validate() {
        Ok(args) => args,
        Err(e) => {
            println!("{e}");
            process::exit(e.exit_code());
        }
    };

    // Sequence first: it decides whether the scaffold exists and creates
    // the output directory the annotation files go into.
    match run(&args, Path::new(".")) {
        Err(e @ SelectError::ScaffoldNotFound(_)) => {
            println!("{e}");
            process::exit(0);
        }
        other => other.map_err(anyhow::Error::from),
    }
}

fn run(args: &Args, base: &Path) -> Result<(), SelectError> {
    let selection = Selection::new(args.scaffold.clone(), base);
    sequences::select_fasta(&args.fasta_path, &selection)?;
    annotations::select_repeats(&args.te_path, &selection)?;
    annotations::select_features(&args.gen_path, &selection)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_run_writes_three_files() {
        let dir = tempdir().unwrap();
        let fasta_path = dir.path().join("asm.fasta");
        let te_path = dir.path().join("tes.gff");
        let gen_path = dir.path().join("genes.gff");
        fs::write(&fasta_path, ">scaffold_3 x\nACGT\n>scaffold_4\nTTTT\n").unwrap();
        fs::write(&te_path, "scaffold_3_c1\ts\tt\t1\t4\t.\t+\t.\ta\tz\n").unwrap();
        fs::write(&gen_path, "# c\nscaffold_3\ts\tgene\t1\t4\t.\t+\t.\tID=g\n").unwrap();

        let args = Args {
            fasta_path,
            te_path,
            gen_path,
            scaffold: "3".parse().unwrap(),
        };
        run(&args, dir.path()).unwrap();

        let out = dir.path().join("scaffold_3_info");
        assert_eq!(
            fs::read_to_string(out.join("scaffold_3.fasta")).unwrap(),
            ">scaffold_3\nACGT\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("TEs_scaffold_3.gff")).unwrap(),
            "scaffold_3\ts\tt\t1\t4\t.\t+\t.\ta\trepeat_region\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("scaffold_3_secreted.gff")).unwrap(),
            "scaffold_3\ts\tgene\t1\t4\t.\t+\t.\tID=g\n"
        );
    }

    #[test]
    fn test_run_stops_on_missing_scaffold() {
        let dir = tempdir().unwrap();
        let fasta_path = dir.path().join("asm.fasta");
        fs::write(&fasta_path, ">scaffold_4\nTTTT\n").unwrap();

        let args = Args {
            fasta_path,
            te_path: dir.path().join("never_read.gff"),
            gen_path: dir.path().join("never_read_either.gff"),
            scaffold: "3".parse().unwrap(),
        };
        let err = run(&args, dir.path()).unwrap_err();
        assert!(matches!(err, SelectError::ScaffoldNotFound(_)));
        assert!(!dir.path().join("scaffold_3_info").exists());
    }
}
