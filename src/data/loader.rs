use std::fs::File;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use super::model::{FeatureRow, FeatureTable};
use crate::error::TableError;

/// Number of leading label fields stripped from every record.
pub const LABEL_COLUMNS: usize = 2;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a tab-separated table.
///
/// Layout:
/// * first line – header, kept verbatim
/// * every other non-empty line – `id<TAB>label<TAB>v1<TAB>…<TAB>vN`
///
/// Every data line must have as many fields as the header. The two label
/// fields are kept on the [`FeatureRow`] for diagnostics only.
pub fn load_table(path: &Path) -> Result<FeatureTable, TableError> {
    let mut reader = open_tsv(path)?;
    let mut record = StringRecord::new();

    let has_header = reader
        .read_record(&mut record)
        .map_err(|e| TableError::from_csv(path, e, &[]))?;
    if !has_header {
        return Err(TableError::EmptyInput { path: path.into() });
    }
    let header: Vec<String> = record.iter().map(|h| h.to_string()).collect();
    if header.len() < LABEL_COLUMNS {
        return Err(TableError::NarrowHeader {
            path: path.into(),
            found: header.len(),
        });
    }
    log::debug!("{}: header {:?}", path.display(), header);

    let mut rows = Vec::new();
    while reader
        .read_record(&mut record)
        .map_err(|e| TableError::from_csv(path, e, &header))?
    {
        let line = line_of(&record);
        if record.len() != header.len() {
            return Err(TableError::RaggedRow {
                line,
                expected: header.len(),
                found: record.len(),
            });
        }

        let values = record
            .iter()
            .enumerate()
            .skip(LABEL_COLUMNS)
            .map(|(j, tok)| parse_field(tok, line, &header[j]))
            .collect::<Result<Vec<f64>, _>>()?;

        rows.push(FeatureRow {
            id: record[0].to_string(),
            label: record[1].to_string(),
            line,
            values,
        });
    }

    log::debug!("{}: {} data rows", path.display(), rows.len());
    Ok(FeatureTable::new(header, rows))
}

/// Read back a matrix written by [`crate::output::write_matrix`]: no header,
/// every field numeric (`NaN` included), all rows the same width.
pub fn load_matrix(path: &Path) -> Result<Vec<Vec<f64>>, TableError> {
    let mut reader = open_tsv(path)?;
    let mut grid: Vec<Vec<f64>> = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| TableError::from_csv(path, e, &[]))?;
        let line = line_of(&record);
        if let Some(first) = grid.first() {
            if record.len() != first.len() {
                return Err(TableError::RaggedRow {
                    line,
                    expected: first.len(),
                    found: record.len(),
                });
            }
        }
        let values = record
            .iter()
            .enumerate()
            .map(|(j, tok)| parse_field(tok, line, &format!("#{}", j + 1)))
            .collect::<Result<Vec<f64>, _>>()?;
        grid.push(values);
    }

    Ok(grid)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Raw TSV reader: no quoting, no implicit header, width checked by callers.
/// Any failure to open the file is reported as [`TableError::FileNotFound`].
fn open_tsv(path: &Path) -> Result<Reader<File>, TableError> {
    let file = File::open(path).map_err(|source| TableError::FileNotFound {
        path: path.into(),
        source,
    })?;

    Ok(ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(file))
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_field(tok: &str, line: u64, column: &str) -> Result<f64, TableError> {
    tok.trim().parse::<f64>().map_err(|_| TableError::Parse {
        line,
        column: column.to_string(),
        value: tok.to_string(),
    })
}
