use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level demeter configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemeterConfig {
    /// Measured-data file paths.
    pub io: IoToml,

    /// Soil description used for the deficit derivation.
    #[serde(default)]
    pub soil: SoilToml,

    /// External water-balance model output.
    pub model: ModelToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Measured volumetric content file (vswc).
    pub content: PathBuf,
    /// Where to write the derived deficit table (vswd).
    #[serde(default)]
    pub deficit: Option<PathBuf>,
    /// Where to write the derived root-zone table (rzsw).
    #[serde(default)]
    pub root_zone: Option<PathBuf>,
}

/// Soil description — per-layer thetaFC wins over the scalar default when
/// both are set.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SoilToml {
    /// Scalar thetaFC (cm^3/cm^3) applied to every layer.
    #[serde(default)]
    pub field_capacity: Option<f64>,
    /// Per-layer thetaFC keyed by layer bottom depth (cm).
    #[serde(default)]
    pub layers: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    /// Fixed-layout model output file (Year DOY Zr TAW RAW).
    pub output: PathBuf,
    /// Maximum root depth (m).
    pub zr_max: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [io]
            content = "plot.vswc"
            deficit = "plot.vswd"
            root_zone = "plot.rzsw"

            [soil]
            field_capacity = 0.28

            [soil.layers]
            15 = 0.32
            30 = 0.28

            [model]
            output = "plot.sim"
            zr_max = 1.2
        "#;
        let config: DemeterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.io.content, PathBuf::from("plot.vswc"));
        assert_eq!(config.soil.field_capacity, Some(0.28));
        let layers = config.soil.layers.unwrap();
        assert_eq!(layers["15"], 0.32);
        assert_eq!(config.model.zr_max, 1.2);
    }

    #[test]
    fn test_soil_section_is_optional() {
        let toml_str = r#"
            [io]
            content = "plot.vswc"

            [model]
            output = "plot.sim"
            zr_max = 0.6
        "#;
        let config: DemeterConfig = toml::from_str(toml_str).unwrap();
        assert!(config.soil.field_capacity.is_none());
        assert!(config.soil.layers.is_none());
        assert!(config.io.deficit.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml_str = r#"
            [io]
            content = "plot.vswc"
            bogus = true

            [model]
            output = "plot.sim"
            zr_max = 0.6
        "#;
        assert!(toml::from_str::<DemeterConfig>(toml_str).is_err());
    }
}
