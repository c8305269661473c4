use std::fmt;

use crate::data::model::FeatureTable;

// ---------------------------------------------------------------------------
// SquareMatrix – row × row result grid
// ---------------------------------------------------------------------------

/// Dense `n × n` matrix of `f64`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SquareMatrix {
    /// `n × n` matrix filled with zeros.
    pub fn zeros(size: usize) -> Self {
        SquareMatrix {
            size,
            values: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, k: usize) -> f64 {
        self.values[i * self.size + k]
    }

    pub fn set(&mut self, i: usize, k: usize, value: f64) {
        self.values[i * self.size + k] = value;
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics, and an empty matrix has no rows anyway
        self.values.chunks(self.size.max(1))
    }

    /// Number of NaN cells (pairs involving a zero-variance row).
    pub fn nan_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// Whether `m[i][k]` and `m[k][i]` agree everywhere, NaN matching NaN.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|k| {
                let (a, b) = (self.get(i, k), self.get(k, i));
                a == b || (a.is_nan() && b.is_nan())
            })
        })
    }
}

impl fmt::Display for SquareMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for v in row {
                if !first {
                    f.write_str("\t")?;
                }
                write!(f, "{v}")?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pairwise metrics
// ---------------------------------------------------------------------------

/// Square root of the summed squared per-feature differences.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// True when every value equals the first one (or there are none). Such a
/// sample has zero variance even when its floating-point mean is inexact.
pub fn is_constant(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

/// Pearson product-moment correlation of two equal-length samples.
///
/// Returns NaN when either sample has zero variance (or is empty); callers
/// keep that value rather than treating it as a failure. Rounding can push a
/// perfect relation a few ulps past ±1, so the result is clamped.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if is_constant(a) || is_constant(b) {
        return f64::NAN;
    }
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut ss_a = 0.0;
    let mut ss_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        ss_a += da * da;
        ss_b += db * db;
    }

    if ss_a == 0.0 || ss_b == 0.0 {
        return f64::NAN;
    }
    (cov / (ss_a.sqrt() * ss_b.sqrt())).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Distance and correlation matrices from one pass over all row pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseMatrices {
    pub distance: SquareMatrix,
    pub correlation: SquareMatrix,
}

/// Evaluate both metrics for every ordered pair `(i, k)`, self-pairs
/// included. Self-pairs go through the general formulas.
pub fn compute_pairwise(table: &FeatureTable) -> PairwiseMatrices {
    let rows = table.rows();
    let n = rows.len();

    for row in rows.iter().filter(|r| r.is_constant()) {
        log::warn!(
            "row '{}' ({}) on line {} has constant values; its correlations are NaN",
            row.id,
            row.label,
            row.line
        );
    }

    let mut distance = SquareMatrix::zeros(n);
    let mut correlation = SquareMatrix::zeros(n);

    for (i, a) in rows.iter().enumerate() {
        for (k, b) in rows.iter().enumerate() {
            distance.set(i, k, euclidean_distance(&a.values, &b.values));
            correlation.set(i, k, pearson_correlation(&a.values, &b.values));
        }
    }

    log::debug!(
        "computed {n}x{n} matrices over {} features",
        table.col_count()
    );
    PairwiseMatrices {
        distance,
        correlation,
    }
}
