//! Selection of rows from GFF-like, tab-separated annotation files.
//!
//! Files are read without a header row; lines starting with `#` and blank
//! lines are skipped. Output is tab-separated with no header and no quoting,
//! so re-reading it the same way yields the selected field values unchanged.

use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, info};

use crate::{
    error::{Result, SelectError},
    scaffold::scaffold_name_in,
    selection::Selection,
};

/// Column removed from transposable element rows.
pub const TE_DROPPED_COLUMN: usize = 9;

/// Feature type appended to every selected transposable element row.
pub const TE_FEATURE_TYPE: &str = "repeat_region";

/// Writes the rows annotated on `scaffold_<N>_c1` to
/// `scaffold_<N>_info/TEs_scaffold_<N>.gff`.
///
/// Only the exact `_c1` contig is selected. Each selected row gets its
/// sequence id shortened to `scaffold_<N>`, loses column 9 and gains a
/// trailing `repeat_region` column. Short rows are fine as long as some
/// row in the file reaches column 9; rows without it have nothing to drop.
pub fn select_repeats(te_file: &Path, selection: &Selection) -> Result<()> {
    let rows = read_rows(te_file)?;
    debug!("read {} rows from {}", rows.len(), te_file.display());

    if let Some(first) = rows.first() {
        if rows.iter().all(|row| row.len() <= TE_DROPPED_COLUMN) {
            return Err(SelectError::MissingColumn {
                path: te_file.to_path_buf(),
                line: first.position().map_or(0, |p| p.line()),
                index: TE_DROPPED_COLUMN,
            });
        }
    }

    let contig = selection.scaffold().te_contig();
    let selected: Vec<StringRecord> = rows
        .iter()
        .filter(|row| seq_id(row) == Some(contig.as_str()))
        .map(repeat_region)
        .collect();

    let path = selection.te_output();
    write_rows(&path, &selected)?;
    report(&path, selected.len(), &contig);
    Ok(())
}

/// Copies the rows annotated on `scaffold_<N>` verbatim to
/// `scaffold_<N>_info/scaffold_<N>_secreted.gff`.
pub fn select_features(gen_file: &Path, selection: &Selection) -> Result<()> {
    let rows = read_rows(gen_file)?;
    debug!("read {} rows from {}", rows.len(), gen_file.display());

    let name = selection.scaffold().name();
    let selected: Vec<StringRecord> = rows
        .into_iter()
        .filter(|row| seq_id(row) == Some(name.as_str()))
        .collect();

    let path = selection.genome_output();
    write_rows(&path, &selected)?;
    report(&path, selected.len(), &name);
    Ok(())
}

pub fn read_rows(path: &Path) -> Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .quoting(false)
        .flexible(true)
        .from_path(path)?;
    let rows = reader.records().collect::<csv::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn write_rows(path: &Path, rows: &[StringRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .flexible(true)
        .from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn seq_id(row: &StringRecord) -> Option<&str> {
    row.get(0)
}

fn repeat_region(row: &StringRecord) -> StringRecord {
    let mut out = StringRecord::with_capacity(row.as_slice().len(), row.len());
    for (index, field) in row.iter().enumerate() {
        match index {
            0 => out.push_field(scaffold_name_in(field).unwrap_or(field)),
            TE_DROPPED_COLUMN => {}
            _ => out.push_field(field),
        }
    }
    out.push_field(TE_FEATURE_TYPE);
    out
}

fn report(path: &Path, count: usize, seq_id: &str) {
    if count == 0 {
        info!("no rows for {seq_id}, {} is empty", path.display());
    } else {
        info!("wrote {count} row(s) to {}", path.display());
    }
}
