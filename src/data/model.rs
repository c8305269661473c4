// ---------------------------------------------------------------------------
// FeatureRow – one data line of the source table
// ---------------------------------------------------------------------------

/// The numeric payload of one record plus the two label fields that were
/// stripped from it. Labels never take part in the metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// First field of the record (row identifier).
    pub id: String,
    /// Second field of the record (class / label).
    pub label: String,
    /// 1-based line number in the source file.
    pub line: u64,
    /// Feature values, `col` of them.
    pub values: Vec<f64>,
}

impl FeatureRow {
    /// True when every value equals the first one, i.e. the row has zero
    /// variance and its Pearson correlation with anything is undefined.
    pub fn is_constant(&self) -> bool {
        crate::metrics::is_constant(&self.values)
    }
}

// ---------------------------------------------------------------------------
// FeatureTable – the complete loaded table
// ---------------------------------------------------------------------------

/// Header plus fixed-width feature rows. Built once by the loader and read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    header: Vec<String>,
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Assemble a table. Callers must already have checked that the header has
    /// at least two names and every row holds `header.len() - 2` values.
    pub(crate) fn new(header: Vec<String>, rows: Vec<FeatureRow>) -> Self {
        debug_assert!(header.len() >= 2);
        debug_assert!(rows.iter().all(|r| r.values.len() == header.len() - 2));
        FeatureTable { header, rows }
    }

    /// Header names, label columns included.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Names of the feature columns only.
    pub fn feature_names(&self) -> &[String] {
        &self.header[2..]
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Number of feature rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of features per row.
    pub fn col_count(&self) -> usize {
        self.header.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[f64]) -> FeatureRow {
        FeatureRow {
            id: "x".into(),
            label: "l".into(),
            line: 2,
            values: values.to_vec(),
        }
    }

    #[test]
    fn dimensions_follow_header() {
        let header = ["ID", "Label", "A", "B", "C"].map(String::from).to_vec();
        let table = FeatureTable::new(header, vec![row(&[1.0, 2.0, 3.0]), row(&[4.0, 6.0, 8.0])]);
        assert_eq!(table.col_count(), 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.feature_names(), ["A", "B", "C"]);
        assert!(!table.is_empty());
    }

    #[test]
    fn constant_rows() {
        assert!(row(&[5.0, 5.0, 5.0]).is_constant());
        assert!(row(&[]).is_constant());
        assert!(!row(&[5.0, 5.0, 5.1]).is_constant());
    }
}
