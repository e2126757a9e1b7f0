//! Read-only view of the external crop-water-balance model.
//!
//! The derivations never own the model; they borrow its soil description
//! (field capacity), its maximum root depth, and its daily output records.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::date::DateKey;
use crate::error::SoilWaterError;
use crate::files;

/// Field capacity supplied by the external model's soil description.
#[derive(Debug, Clone)]
pub enum FieldCapacity {
    /// A single thetaFC (cm^3/cm^3) applied to every layer.
    Uniform(f64),
    /// Per-layer thetaFC keyed by layer bottom depth (cm).
    ByLayer(BTreeMap<u32, f64>),
}

impl FieldCapacity {
    /// Field capacity for the layer with the given bottom depth.
    ///
    /// # Errors
    ///
    /// Returns [`SoilWaterError::MissingFieldCapacity`] if per-layer data
    /// carries no entry for `depth`.
    pub fn for_depth(&self, depth: u32) -> Result<f64, SoilWaterError> {
        match self {
            Self::Uniform(fc) => Ok(*fc),
            Self::ByLayer(map) => map
                .get(&depth)
                .copied()
                .ok_or(SoilWaterError::MissingFieldCapacity { depth }),
        }
    }
}

/// One daily output record of the water-balance simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimRecord {
    /// Simulated root depth (m).
    pub zr: f64,
    /// Total available water in the root zone (mm).
    pub taw: f64,
    /// Readily available water in the root zone (mm).
    pub raw: f64,
}

/// Simulated outputs consumed from the external water-balance model.
#[derive(Debug, Clone)]
pub struct ModelOutputs {
    zr_max: f64,
    records: BTreeMap<DateKey, SimRecord>,
}

impl ModelOutputs {
    /// Wrap a maximum root depth (m) and a date-indexed record table.
    pub fn new(zr_max: f64, records: BTreeMap<DateKey, SimRecord>) -> Self {
        Self { zr_max, records }
    }

    /// Maximum root depth (m).
    pub fn zr_max(&self) -> f64 {
        self.zr_max
    }

    /// Simulation record for a date, if the model produced one.
    pub fn record(&self, date: &DateKey) -> Option<&SimRecord> {
        self.records.get(date)
    }

    /// Number of simulated dates.
    pub fn n_records(&self) -> usize {
        self.records.len()
    }

    /// Load model output from a fixed-layout text file.
    ///
    /// The layout follows the measured-data files: four decorative header
    /// lines, a column-header line, then one `Year DOY Zr TAW RAW` row per
    /// simulated date.
    ///
    /// # Errors
    ///
    /// Returns [`SoilWaterError::Io`] if the file cannot be read and
    /// [`SoilWaterError::Malformed`] for rows that do not parse.
    pub fn load(path: &Path, zr_max: f64) -> Result<Self, SoilWaterError> {
        let text = fs::read_to_string(path).map_err(|source| SoilWaterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut records = BTreeMap::new();
        for (idx, line) in text.lines().enumerate().skip(files::N_HEADER_LINES) {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 5 {
                return Err(SoilWaterError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: format!("expected 5 columns (Year DOY Zr TAW RAW), got {}", tokens.len()),
                });
            }
            let date = files::parse_date_row_key(tokens[0], tokens[1], path, line_no)?;
            let zr = files::parse_f64(tokens[2], path, line_no)?;
            let taw = files::parse_f64(tokens[3], path, line_no)?;
            let raw = files::parse_f64(tokens[4], path, line_no)?;
            records.insert(date, SimRecord { zr, taw, raw });
        }

        Ok(Self::new(zr_max, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_uniform_field_capacity() {
        let fc = FieldCapacity::Uniform(0.3);
        assert_eq!(fc.for_depth(15).unwrap(), 0.3);
        assert_eq!(fc.for_depth(120).unwrap(), 0.3);
    }

    #[test]
    fn test_by_layer_field_capacity() {
        let mut map = BTreeMap::new();
        map.insert(15, 0.32);
        map.insert(30, 0.28);
        let fc = FieldCapacity::ByLayer(map);
        assert_eq!(fc.for_depth(30).unwrap(), 0.28);
        assert!(matches!(
            fc.for_depth(60),
            Err(SoilWaterError::MissingFieldCapacity { depth: 60 })
        ));
    }

    #[test]
    fn test_load_model_output() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("corn2023.sim");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "{}", "*".repeat(72)).unwrap();
        writeln!(f, "demeter: FAO-56 Crop Water Balance Tools").unwrap();
        writeln!(f, "Simulated Root Depth (m) & Available Water (mm) Data").unwrap();
        writeln!(f, "{}", "*".repeat(72)).unwrap();
        writeln!(f, "Year DOY    Zr     TAW     RAW").unwrap();
        writeln!(f, "2023 158 0.450  81.000  44.550").unwrap();
        writeln!(f, "2023 172 0.620 111.600  61.380").unwrap();
        drop(f);

        let model = ModelOutputs::load(&path, 1.2).unwrap();
        assert_eq!(model.zr_max(), 1.2);
        assert_eq!(model.n_records(), 2);

        let d = "2023-172".parse().unwrap();
        let rec = model.record(&d).unwrap();
        assert_eq!(rec.zr, 0.62);
        assert_eq!(rec.taw, 111.6);
        assert_eq!(rec.raw, 61.38);
    }

    #[test]
    fn test_load_model_output_malformed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("bad.sim");
        let header = format!(
            "{0}\ntitle\nsubtitle\n{0}\nYear DOY Zr TAW RAW\n2023 158 x 81.0 44.5\n",
            "*".repeat(72)
        );
        std::fs::write(&path, header).unwrap();

        let err = ModelOutputs::load(&path, 1.2).unwrap_err();
        assert!(matches!(err, SoilWaterError::Malformed { line: 6, .. }));
    }
}
