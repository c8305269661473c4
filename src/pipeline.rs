use std::io::Write;

use crate::config::Config;
use crate::data::loader::load_table;
use crate::error::TableError;
use crate::metrics::compute_pairwise;
use crate::output::write_outputs;

/// Load the input, compute both matrices, and write them out.
///
/// The human-readable summary (dimensions, header names, completion marker)
/// goes to `out`; nothing is written to the output paths if loading fails.
pub fn run(config: &Config, out: &mut impl Write) -> Result<(), TableError> {
    log::info!("loading {}", config.input_path.display());
    let table = load_table(&config.input_path)?;

    let summary = |e: std::io::Error| TableError::io("<stdout>", e);
    writeln!(out, "Row: {}, Col: {}", table.row_count(), table.col_count()).map_err(summary)?;
    for name in table.header() {
        writeln!(out, "{name}").map_err(summary)?;
    }

    let matrices = compute_pairwise(&table);
    let undefined = matrices.correlation.nan_count();
    if undefined > 0 {
        log::warn!("{undefined} correlation value(s) are NaN");
    }

    write_outputs(config, &matrices)?;
    writeln!(out, "finish!").map_err(summary)?;
    Ok(())
}
