use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use log::{debug, info};
use noodles::fasta::{self as fasta, record::Definition, Record};

use crate::{
    error::{Result, SelectError},
    selection::Selection,
};

/// Writes the scaffold's sequence to `scaffold_<N>_info/scaffold_<N>.fasta`.
///
/// The output directory is created here, and only once the scaffold is known
/// to be present, so a missing scaffold leaves nothing behind on disk. An
/// existing output directory is an error; nothing is overwritten.
pub fn select_fasta(fasta_file: &Path, selection: &Selection) -> Result<()> {
    let records = read_records(fasta_file)?;
    debug!("read {} records from {}", records.len(), fasta_file.display());

    let selected = matching_records(records, &selection.scaffold().name());
    if selected.is_empty() {
        return Err(SelectError::ScaffoldNotFound(selection.scaffold().clone()));
    }

    create_output_dir(selection.out_dir())?;

    let path = selection.fasta_output();
    write_records(&path, &selected)?;
    info!("wrote {} record(s) to {}", selected.len(), path.display());
    Ok(())
}

// Load every record in the file; a malformed record anywhere fails the read.
fn read_records(fasta_file: &Path) -> Result<Vec<Record>> {
    let mut reader = File::open(fasta_file)
        .map(BufReader::new)
        .map(fasta::Reader::new)?;
    let records = reader.records().collect::<io::Result<Vec<_>>>()?;
    Ok(records)
}

// Keep the records named exactly `name`, stripped of their descriptions.
fn matching_records(records: Vec<Record>, name: &str) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| record.name() == name)
        .map(|record| {
            let definition = Definition::new(record.name(), None);
            Record::new(definition, record.sequence().clone())
        })
        .collect()
}

fn create_output_dir(out_dir: &Path) -> Result<()> {
    match fs::create_dir(out_dir) {
        Ok(()) => {
            info!("created {}", out_dir.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(SelectError::OutputDirExists(out_dir.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

// Each record becomes a header line and a single, unwrapped sequence line,
// which is blank for an empty sequence.
fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let line_base_count = records
        .iter()
        .map(|record| record.sequence().len())
        .max()
        .unwrap_or(0)
        .max(1);

    let mut out = BufWriter::new(File::create(path)?);
    for record in records {
        if record.sequence().as_ref().is_empty() {
            writeln!(out, "{}", record.definition())?;
            writeln!(out)?;
        } else {
            let mut writer = fasta::writer::Builder::default()
                .set_line_base_count(line_base_count)
                .build_with_writer(&mut out);
            writer.write_record(record)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const FASTA: &str = "\
>scaffold_1 first scaffold
ACGTACGTAC
GTACGT
>scaffold_7 len=24 assembled
TTTTGGGGCCCCAAAA
ACGTNNNN
>scaffold_70
GGGG
";

    fn selection_in(dir: &Path, number: &str) -> Selection {
        Selection::new(number.parse().unwrap(), dir)
    }

    #[test]
    fn test_writes_two_line_fasta() {
        let dir = tempdir().unwrap();
        let fasta_file = dir.path().join("genome.fasta");
        fs::write(&fasta_file, FASTA).unwrap();

        let selection = selection_in(dir.path(), "7");
        select_fasta(&fasta_file, &selection).unwrap();

        let written = fs::read_to_string(selection.fasta_output()).unwrap();
        assert_eq!(written, ">scaffold_7\nTTTTGGGGCCCCAAAAACGTNNNN\n");
    }

    #[test]
    fn test_exact_name_match() {
        let dir = tempdir().unwrap();
        let fasta_file = dir.path().join("genome.txt");
        fs::write(&fasta_file, FASTA).unwrap();

        let selection = selection_in(dir.path(), "70");
        select_fasta(&fasta_file, &selection).unwrap();

        let written = fs::read_to_string(selection.fasta_output()).unwrap();
        assert_eq!(written, ">scaffold_70\nGGGG\n");
    }

    #[test]
    fn test_duplicate_names_all_written() {
        let dir = tempdir().unwrap();
        let fasta_file = dir.path().join("dup.fasta");
        fs::write(&fasta_file, ">scaffold_2\nAC\n>scaffold_2 again\nGT\n").unwrap();

        let selection = selection_in(dir.path(), "2");
        select_fasta(&fasta_file, &selection).unwrap();

        let written = fs::read_to_string(selection.fasta_output()).unwrap();
        assert_eq!(written, ">scaffold_2\nAC\n>scaffold_2\nGT\n");
    }

    #[test]
    fn test_empty_sequence_keeps_two_lines() {
        let dir = tempdir().unwrap();
        let fasta_file = dir.path().join("gaps.fasta");
        fs::write(&fasta_file, ">scaffold_5 placeholder\n>scaffold_6\nAC\n").unwrap();

        let selection = selection_in(dir.path(), "5");
        select_fasta(&fasta_file, &selection).unwrap();

        let written = fs::read_to_string(selection.fasta_output()).unwrap();
        assert_eq!(written, ">scaffold_5\n\n");
    }

    #[test]
    fn test_missing_scaffold_creates_nothing() {
        let dir = tempdir().unwrap();
        let fasta_file = dir.path().join("genome.fasta");
        fs::write(&fasta_file, FASTA).unwrap();

        let selection = selection_in(dir.path(), "3");
        let err = select_fasta(&fasta_file, &selection).unwrap_err();

        assert!(matches!(err, SelectError::ScaffoldNotFound(_)));
        assert_eq!(err.to_string(), "Scaffold 3 nao existente!");
        assert!(!selection.out_dir().exists());
    }

    #[test]
    fn test_existing_output_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let fasta_file = dir.path().join("genome.fasta");
        fs::write(&fasta_file, FASTA).unwrap();

        let selection = selection_in(dir.path(), "1");
        fs::create_dir(selection.out_dir()).unwrap();

        let err = select_fasta(&fasta_file, &selection).unwrap_err();
        assert!(matches!(err, SelectError::OutputDirExists(_)));
        assert!(!selection.fasta_output().exists());
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempdir().unwrap();
        let selection = selection_in(dir.path(), "1");
        let err = select_fasta(&dir.path().join("absent.fasta"), &selection).unwrap_err();
        assert!(matches!(err, SelectError::Io(_)));
    }
}
