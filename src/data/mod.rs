/// Data layer: table model and TSV loading.
///
/// Architecture:
/// ```text
///   input.tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → FeatureTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ FeatureTable │  header, Vec<FeatureRow>
///   └──────────────┘
/// ```

pub mod loader;
pub mod model;
