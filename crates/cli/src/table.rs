//! Constraint tables on disk: CSV (or Parquet) with columns `a1, a2, b`, one
//! row per inequality `a1 x + a2 y <= b`.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use polywalk::geom2::Hs2;
use std::path::Path;

/// Read a constraint table. Integer columns are accepted and cast to f64.
pub fn read_constraints(path: &Path) -> Result<Vec<Hs2>> {
    let lf = if path.extension().is_some_and(|e| e == "parquet") {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())
    } else {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()
    };
    let df = lf
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("a1").cast(DataType::Float64),
            col("a2").cast(DataType::Float64),
            col("b").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading columns a1, a2, b from {}", path.display()))?;
    tracing::info!(rows = df.height(), path = %path.display(), "constraints_read");

    let a1 = df.column("a1")?.f64()?;
    let a2 = df.column("a2")?.f64()?;
    let b = df.column("b")?.f64()?;
    let mut out = Vec::with_capacity(df.height());
    for (row, ((x, y), c)) in a1.into_iter().zip(a2).zip(b).enumerate() {
        match (x, y, c) {
            (Some(x), Some(y), Some(c)) => out.push(Hs2::from_row([x, y], c)),
            _ => bail!("row {row} of {} has a missing value", path.display()),
        }
    }
    Ok(out)
}

/// Write a constraint table in the layout `read_constraints` expects.
pub fn write_constraints(path: &Path, hs: &[Hs2]) -> Result<()> {
    let a1: Vec<f64> = hs.iter().map(|h| h.n.x).collect();
    let a2: Vec<f64> = hs.iter().map(|h| h.n.y).collect();
    let b: Vec<f64> = hs.iter().map(|h| h.c).collect();
    let mut df = df!("a1" => a1, "a2" => a2, "b" => b)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}
