//! Derive command: compute deficit and root-zone tables from measured
//! content and model output.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use demeter_soilwater::{FieldCapacity, ModelOutputs, SoilWater};

use crate::cli::DeriveArgs;
use crate::config::{DemeterConfig, SoilToml};

/// Run the soil-water derivation pipeline.
pub fn run(args: DeriveArgs) -> Result<()> {
    let _cmd = info_span!("derive").entered();

    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: DemeterConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    if config.io.deficit.is_none() && config.io.root_zone.is_none() {
        bail!("no output path: set [io].deficit and/or [io].root_zone in config");
    }

    // 2. Load measured content
    info!(path = %config.io.content.display(), "reading measured content");
    let mut sw = SoilWater::new();
    sw.load(&config.io.content)
        .with_context(|| format!("failed to load content: {}", config.io.content.display()))?;
    info!(
        n_layers = sw.content().n_layers(),
        n_dates = sw.content().dates().len(),
        "measured content loaded"
    );

    // 3. Derive deficit from field capacity
    let fc = build_field_capacity(&config.soil)?;
    sw.derive_deficit(&fc).context("deficit derivation failed")?;

    // 4. Load model output and derive root zone
    info!(path = %config.model.output.display(), "reading model output");
    let model = ModelOutputs::load(&config.model.output, config.model.zr_max)
        .with_context(|| {
            format!(
                "failed to read model output: {}",
                config.model.output.display()
            )
        })?;
    info!(
        n_records = model.n_records(),
        zr_max = model.zr_max(),
        "model output loaded"
    );

    sw.derive_root_zone(&model)
        .context("root zone derivation failed")?;

    // 5. Write derived tables
    if let Some(path) = &config.io.deficit {
        sw.save(path)
            .with_context(|| format!("failed to write deficit table: {}", path.display()))?;
        info!(path = %path.display(), "deficit table written");
    }
    if let Some(path) = &config.io.root_zone {
        sw.save(path)
            .with_context(|| format!("failed to write root zone table: {}", path.display()))?;
        info!(path = %path.display(), "root zone table written");
    }
    Ok(())
}

/// Build the field-capacity collaborator from the `[soil]` config section.
fn build_field_capacity(soil: &SoilToml) -> Result<FieldCapacity> {
    if let Some(layers) = &soil.layers {
        let mut map = BTreeMap::new();
        for (depth, theta_fc) in layers {
            let depth: u32 = depth.parse().with_context(|| {
                format!("invalid layer depth '{depth}' in [soil.layers] (expected cm as integer)")
            })?;
            map.insert(depth, *theta_fc);
        }
        return Ok(FieldCapacity::ByLayer(map));
    }
    match soil.field_capacity {
        Some(theta_fc) => Ok(FieldCapacity::Uniform(theta_fc)),
        None => bail!("no field capacity: set [soil].field_capacity or a [soil.layers] table"),
    }
}
