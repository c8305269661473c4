use std::path::PathBuf;

// ---------------------------------------------------------------------------
// TableError – everything that can stop a run
// ---------------------------------------------------------------------------

/// Failures raised while loading a table or writing a matrix.
///
/// A zero-variance row is not an error: its correlations are NaN and travel
/// into the output untouched.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The input could not be opened: missing, unreadable, or not a file path.
    #[error("cannot open input file {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: file is empty, expected a header line", path.display())]
    EmptyInput { path: PathBuf },

    #[error("{}: header has {found} column(s), need at least the two label columns", path.display())]
    NarrowHeader { path: PathBuf, found: usize },

    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column '{column}': '{value}' is not a number")]
    Parse {
        line: u64,
        column: String,
        value: String,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TableError {
    /// Process exit status for this failure. `2` is left to clap usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            TableError::FileNotFound { .. } => 3,
            TableError::EmptyInput { .. }
            | TableError::NarrowHeader { .. }
            | TableError::RaggedRow { .. }
            | TableError::Parse { .. } => 4,
            TableError::Io { .. } => 5,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TableError::Io {
            path: path.into(),
            source,
        }
    }

    /// Map a `csv` error raised against `path`. Invalid UTF-8 inside a record
    /// is malformed input and becomes [`TableError::Parse`], its column named
    /// from `columns` when known; I/O errors keep their source.
    pub(crate) fn from_csv(path: impl Into<PathBuf>, err: csv::Error, columns: &[String]) -> Self {
        if let csv::ErrorKind::Utf8 { pos, err: utf8 } = err.kind() {
            let field = utf8.field();
            return TableError::Parse {
                line: pos.as_ref().map_or(0, |p| p.line()),
                column: columns
                    .get(field)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", field + 1)),
                value: "<invalid UTF-8>".to_string(),
            };
        }

        let path = path.into();
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => TableError::Io { path, source },
            _ => TableError::Io {
                path,
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_per_kind() {
        let missing = TableError::FileNotFound {
            path: "nope.txt".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let parse = TableError::Parse {
            line: 3,
            column: "SepalLength".into(),
            value: "abc".into(),
        };
        let io = TableError::io(
            "out/distance.txt",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert_eq!(missing.exit_code(), 3);
        assert_eq!(parse.exit_code(), 4);
        assert_eq!(io.exit_code(), 5);
    }

    #[test]
    fn parse_message_names_line_and_field() {
        let err = TableError::Parse {
            line: 7,
            column: "PetalWidth".into(),
            value: "x1".into(),
        };
        assert_eq!(
            err.to_string(),
            "line 7, column 'PetalWidth': 'x1' is not a number"
        );
    }
}
