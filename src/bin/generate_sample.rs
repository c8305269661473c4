//! Write a synthetic iris-like table for quick manual runs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csv::WriterBuilder;

/// Per-class feature means and spreads (sepal length, sepal width, petal
/// length, petal width), in centimetres.
const CLASSES: [(&str, [f64; 4], [f64; 4]); 3] = [
    ("setosa", [5.01, 3.43, 1.46, 0.25], [0.35, 0.38, 0.17, 0.11]),
    ("versicolor", [5.94, 2.77, 4.26, 1.33], [0.52, 0.31, 0.47, 0.20]),
    ("virginica", [6.59, 2.97, 5.55, 2.03], [0.64, 0.32, 0.55, 0.27]),
];

#[derive(Debug, Parser)]
#[command(about = "Generate a synthetic iris-like TSV table")]
struct Args {
    /// Destination file
    #[arg(default_value = rowsim::config::DEFAULT_INPUT)]
    output: PathBuf,
    /// Rows per class
    #[arg(long, default_value_t = 50)]
    per_class: usize,
    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// splitmix64 stream with a Box-Muller normal sampler.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        let u1 = self.unit().max(f64::MIN_POSITIVE);
        let u2 = self.unit();
        mean + sd * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = Rng(args.seed);

    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    writer
        .write_record([
            "ID",
            "Species",
            "SepalLength",
            "SepalWidth",
            "PetalLength",
            "PetalWidth",
        ])
        .context("writing header")?;

    let mut id = 0;
    for (species, means, spreads) in CLASSES {
        for _ in 0..args.per_class {
            id += 1;
            let mut record = vec![format!("s{id}"), species.to_string()];
            record.extend(
                means
                    .iter()
                    .zip(spreads)
                    .map(|(&m, s)| format!("{:.1}", rng.normal(m, s).max(0.1))),
            );
            writer
                .write_record(&record)
                .with_context(|| format!("writing row {id}"))?;
        }
    }
    writer.flush().context("flushing output")?;

    log::info!("wrote {id} rows to {}", args.output.display());
    println!("Wrote {id} rows to {}", args.output.display());
    Ok(())
}
