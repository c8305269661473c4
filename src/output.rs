use std::fs;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tempfile::{Builder, NamedTempFile};

use crate::config::Config;
use crate::error::TableError;
use crate::metrics::{PairwiseMatrices, SquareMatrix};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Write one matrix as TSV: a line per row, tab between values, no trailing
/// tab. Replaces `path` atomically, so a failed write leaves any previous
/// file in place and never a truncated one.
pub fn write_matrix(path: &Path, matrix: &SquareMatrix) -> Result<(), TableError> {
    let staged = stage(path, matrix)?;
    commit(staged, path)
}

/// Write both matrices to the paths in `config`. Neither destination is
/// touched unless both matrices were staged successfully.
pub fn write_outputs(config: &Config, matrices: &PairwiseMatrices) -> Result<(), TableError> {
    let distance = stage(&config.distance_output_path, &matrices.distance)?;
    let correlation = stage(&config.correlation_output_path, &matrices.correlation)?;

    commit(distance, &config.distance_output_path)?;
    commit(correlation, &config.correlation_output_path)?;
    log::info!(
        "wrote {} and {}",
        config.distance_output_path.display(),
        config.correlation_output_path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Staging
// ---------------------------------------------------------------------------

/// Serialize `matrix` into a temporary file next to `path`. The temp file
/// takes the mode an in-place overwrite would leave: the destination's current
/// permissions if it exists, the umask default otherwise.
fn stage(path: &Path, matrix: &SquareMatrix) -> Result<NamedTempFile, TableError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = temp_builder()
        .tempfile_in(dir)
        .map_err(|e| TableError::io(path, e))?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| TableError::io(path, e))?;
    }

    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .terminator(line_terminator())
        .from_writer(tmp.as_file_mut());
    for row in matrix.rows() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| TableError::from_csv(path, e, &[]))?;
    }
    writer.flush().map_err(|e| TableError::io(path, e))?;
    drop(writer);

    log::debug!(
        "staged {n}x{n} matrix for {} at {}",
        path.display(),
        tmp.path().display(),
        n = matrix.size()
    );
    Ok(tmp)
}

fn temp_builder() -> Builder<'static, 'static> {
    let mut builder = Builder::new();
    builder.prefix(".rowsim-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // passed to open(2), so the process umask still applies
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}

fn commit(staged: NamedTempFile, path: &Path) -> Result<(), TableError> {
    staged
        .persist(path)
        .map(|_| ())
        .map_err(|e| TableError::io(path, e.error))
}

fn line_terminator() -> Terminator {
    if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_matrix;
    use tempfile::TempDir;

    fn sample() -> SquareMatrix {
        let mut m = SquareMatrix::zeros(3);
        m.set(0, 1, 7.5);
        m.set(1, 0, 7.5);
        m.set(0, 2, f64::NAN);
        m.set(2, 0, f64::NAN);
        m.set(1, 2, 0.25);
        m.set(2, 1, 0.25);
        m
    }

    #[test]
    fn tab_separated_without_trailing_tab() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("distance.txt");
        write_matrix(&path, &sample()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "0\t7.5\tNaN");
        assert_eq!(lines[1], "7.5\t0\t0.25");
        assert!(lines.iter().all(|l| !l.ends_with('\t')));
    }

    #[test]
    fn round_trip_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m.txt");
        let m = sample();
        write_matrix(&path, &m).unwrap();

        let grid = load_matrix(&path).unwrap();
        assert_eq!(grid.len(), 3);
        for (i, row) in grid.iter().enumerate() {
            assert_eq!(row.len(), 3);
            for (k, v) in row.iter().enumerate() {
                let expected = m.get(i, k);
                assert!(*v == expected || (v.is_nan() && expected.is_nan()));
            }
        }
    }

    #[test]
    fn empty_matrix_gives_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        write_matrix(&path, &SquareMatrix::zeros(0)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m.txt");
        fs::write(&path, "stale\tcontent\nthat\tis\nlonger\tthan\nthe\tmatrix\n").unwrap();
        write_matrix(&path, &SquareMatrix::zeros(1)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().trim_end(), "0");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/m.txt");
        let err = write_matrix(&path, &sample()).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn failed_stage_leaves_both_outputs_alone() {
        let dir = TempDir::new().unwrap();
        let distance = dir.path().join("distance.txt");
        fs::write(&distance, "previous").unwrap();
        let config = Config {
            input_path: dir.path().join("in.txt"),
            distance_output_path: distance.clone(),
            correlation_output_path: dir.path().join("missing/correlation.txt"),
        };
        let matrices = PairwiseMatrices {
            distance: sample(),
            correlation: sample(),
        };

        assert!(write_outputs(&config, &matrices).is_err());
        assert_eq!(fs::read_to_string(&distance).unwrap(), "previous");
    }

    #[cfg(unix)]
    #[test]
    fn keeps_mode_of_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("distance.txt");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_matrix(&path, &sample()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn new_file_gets_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("plain.txt");
        fs::write(&plain, "").unwrap();
        let path = dir.path().join("correlation.txt");

        write_matrix(&path, &sample()).unwrap();
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }
}
