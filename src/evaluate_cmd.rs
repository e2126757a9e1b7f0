//! Evaluate command: goodness-of-fit statistics for a measured vs. modeled
//! series pair.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use demeter_stats::goodness_of_fit;

use crate::cli::EvaluateArgs;

/// Run the standalone fit evaluation.
pub fn run(args: EvaluateArgs) -> Result<()> {
    let _cmd = info_span!("evaluate").entered();

    let meas = read_series(&args.measured)
        .with_context(|| format!("failed to read measured series: {}", args.measured.display()))?;
    let modeled = read_series(&args.modeled)
        .with_context(|| format!("failed to read modeled series: {}", args.modeled.display()))?;
    info!(
        n_measured = meas.len(),
        n_modeled = modeled.len(),
        "series loaded"
    );

    let fit = goodness_of_fit(&meas, &modeled).context("fit computation failed")?;
    let json = serde_json::to_string_pretty(&fit).context("failed to serialize fit summary")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write fit summary: {}", path.display()))?;
            info!(path = %path.display(), "fit summary written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Read a numeric series: one value per line, blank lines and `#` comments
/// skipped.
fn read_series(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)?;
    let mut values = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let value: f64 = line
            .parse()
            .with_context(|| format!("line {}: invalid number '{line}'", idx + 1))?;
        values.push(value);
    }
    Ok(values)
}
