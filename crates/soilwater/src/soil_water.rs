//! The measured soil-water dataset and its derivations.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::SoilWaterError;
use crate::files::{self, FileKind};
use crate::model::{FieldCapacity, ModelOutputs};
use crate::root_zone::{RootZoneRecord, RootZoneTable};
use crate::table::LayerTable;

/// Increments per metre of the fine-grained depth unit (10^-5 m).
const UNITS_PER_M: f64 = 100_000.0;
/// Increments per centimetre of layer depth.
const UNITS_PER_CM: u64 = 1000;

/// Measured soil-water observations for one plot: volumetric content and
/// fractional deficit by layer, plus the derived root-zone summary.
///
/// Tables start empty and are populated by [`load`](Self::load) or by the
/// derivations; re-running a derivation overwrites its table in place.
#[derive(Debug, Clone, Default)]
pub struct SoilWater {
    content: LayerTable,
    deficit: LayerTable,
    root_zone: RootZoneTable,
}

impl SoilWater {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Measured volumetric content table (cm^3/cm^3).
    pub fn content(&self) -> &LayerTable {
        &self.content
    }

    /// Measured fractional deficit table (cm^3/cm^3).
    pub fn deficit(&self) -> &LayerTable {
        &self.deficit
    }

    /// Derived root-zone summary table.
    pub fn root_zone(&self) -> &RootZoneTable {
        &self.root_zone
    }

    /// Replace the content table, e.g. when measurements come from a source
    /// other than a vswc file.
    pub fn set_content(&mut self, content: LayerTable) {
        self.content = content;
    }

    /// Load a measured soil-water file, routing by extension.
    ///
    /// # Errors
    ///
    /// Returns [`SoilWaterError::UnsupportedExtension`] for unknown
    /// extensions, [`SoilWaterError::Io`] if the file cannot be read, and
    /// [`SoilWaterError::Malformed`] for rows that do not parse.
    pub fn load(&mut self, path: &Path) -> Result<(), SoilWaterError> {
        let kind = FileKind::from_path(path)?;
        self.load_kind(path, kind)
    }

    /// Load a measured soil-water file into the table for `kind`.
    pub fn load_kind(&mut self, path: &Path, kind: FileKind) -> Result<(), SoilWaterError> {
        match kind {
            FileKind::Content => {
                self.content = files::read_layer_table(path)?;
                debug!(
                    path = %path.display(),
                    n_layers = self.content.n_layers(),
                    n_dates = self.content.dates().len(),
                    "content table loaded"
                );
            }
            FileKind::Deficit => {
                self.deficit = files::read_layer_table(path)?;
                debug!(
                    path = %path.display(),
                    n_layers = self.deficit.n_layers(),
                    n_dates = self.deficit.dates().len(),
                    "deficit table loaded"
                );
            }
            FileKind::RootZone => {
                self.root_zone = files::read_root_zone(path)?;
                debug!(
                    path = %path.display(),
                    n_dates = self.root_zone.len(),
                    "root zone table loaded"
                );
            }
        }
        Ok(())
    }

    /// Save one table to a file, routing by extension.
    ///
    /// Saving an empty table is a no-op, logged at warn level, so callers
    /// can tell "nothing to write" apart from a write failure.
    pub fn save(&self, path: &Path) -> Result<(), SoilWaterError> {
        let kind = FileKind::from_path(path)?;
        self.save_kind(path, kind)
    }

    /// Save the table for `kind` to a file.
    pub fn save_kind(&self, path: &Path, kind: FileKind) -> Result<(), SoilWaterError> {
        match kind {
            FileKind::Content => {
                if self.content.is_empty() {
                    warn!(path = %path.display(), "content table is empty; nothing to save");
                    return Ok(());
                }
                files::write_layer_table(path, &self.content, kind)
            }
            FileKind::Deficit => {
                if self.deficit.is_empty() {
                    warn!(path = %path.display(), "deficit table is empty; nothing to save");
                    return Ok(());
                }
                files::write_layer_table(path, &self.deficit, kind)
            }
            FileKind::RootZone => {
                if self.root_zone.is_empty() {
                    warn!(path = %path.display(), "root zone table is empty; nothing to save");
                    return Ok(());
                }
                files::write_root_zone(path, &self.root_zone)
            }
        }
    }

    /// Derive the fractional deficit table from the content table:
    /// `deficit = max(0, thetaFC - content)` per layer and date.
    ///
    /// Content above field capacity clamps to zero deficit; `NaN`
    /// measurements stay `NaN`.
    ///
    /// # Errors
    ///
    /// Returns [`SoilWaterError::MissingFieldCapacity`] if per-layer field
    /// capacity data lacks a measured layer.
    pub fn derive_deficit(&mut self, fc: &FieldCapacity) -> Result<(), SoilWaterError> {
        let mut deficit = LayerTable::with_dates(self.content.dates().to_vec());
        for (depth, values) in self.content.rows() {
            let theta_fc = fc.for_depth(depth)?;
            let row = values
                .iter()
                .map(|&v| if v.is_nan() { f64::NAN } else { (theta_fc - v).max(0.0) })
                .collect();
            deficit.insert_row(depth, row)?;
        }
        info!(
            n_layers = deficit.n_layers(),
            n_dates = deficit.dates().len(),
            "deficit table derived"
        );
        self.deficit = deficit;
        Ok(())
    }

    /// Derive the root-zone summary table from the deficit and content
    /// tables and the model's simulated root depth.
    ///
    /// For each measurement date with a model record, the per-layer values
    /// are integrated over 10^-5 m depth increments down to the maximum root
    /// depth; an increment belongs to the shallowest layer whose bottom
    /// boundary lies at or beyond it and contributes `value / 100` mm.
    /// Increments within the simulated root depth Zr feed the active-zone
    /// sums; all increments feed the maximum-zone sums. The measured stress
    /// coefficient is `Ks = clamp((TAW - SWDr) / (TAW - RAW), 0, 1)`.
    ///
    /// Dates absent from the model output are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SoilWaterError::DeficitNotComputed`] if the deficit table
    /// is empty, [`SoilWaterError::RootBeyondProfile`] if the maximum root
    /// depth reaches below the deepest measured layer, and
    /// [`SoilWaterError::MissingContent`] if the content table lacks a value
    /// the integration needs.
    pub fn derive_root_zone(&mut self, model: &ModelOutputs) -> Result<(), SoilWaterError> {
        let Some(deepest) = self.deficit.deepest() else {
            return Err(SoilWaterError::DeficitNotComputed);
        };
        if self.deficit.dates().is_empty() {
            return Err(SoilWaterError::DeficitNotComputed);
        }

        let rmax_units = (model.zr_max() * UNITS_PER_M).round() as u64;
        if rmax_units > deepest as u64 * UNITS_PER_CM {
            return Err(SoilWaterError::RootBeyondProfile {
                zr_max: model.zr_max(),
                deepest,
            });
        }

        let mut root_zone = RootZoneTable::new();
        for (col, date) in self.deficit.dates().iter().enumerate() {
            let Some(sim) = model.record(date) else {
                debug!(%date, "no model record for measurement date; skipping");
                continue;
            };
            let zr_units = (sim.zr * UNITS_PER_M).round() as u64;

            let mut swd_r = 0.0;
            let mut swd_rmax = 0.0;
            let mut swc_r = 0.0;
            let mut swc_rmax = 0.0;

            // Layer-by-layer closed form of the unit-increment walk: the
            // layer with bottom depth d owns increments (prev*1000, d*1000].
            let mut prev_units = 0u64;
            for (depth, deficits) in self.deficit.rows() {
                let top = prev_units + 1;
                let bottom = depth as u64 * UNITS_PER_CM;
                let hi = bottom.min(rmax_units);
                if hi >= top {
                    let n_max = (hi - top + 1) as f64;
                    let n_active = if zr_units >= top {
                        (hi.min(zr_units) - top + 1) as f64
                    } else {
                        0.0
                    };

                    let swd = deficits[col];
                    let swc = self.content.value(depth, date).ok_or(
                        SoilWaterError::MissingContent { depth, date: *date },
                    )?;

                    // Each increment contributes value/100 mm.
                    swd_r += swd * n_active / 100.0;
                    swd_rmax += swd * n_max / 100.0;
                    swc_r += swc * n_active / 100.0;
                    swc_rmax += swc * n_max / 100.0;
                }
                prev_units = bottom;
                if prev_units >= rmax_units {
                    break;
                }
            }

            let meas_ks = ((sim.taw - swd_r) / (sim.taw - sim.raw)).clamp(0.0, 1.0);
            root_zone.insert(
                *date,
                RootZoneRecord {
                    zr: sim.zr,
                    swd_r,
                    swd_rmax,
                    swc_r,
                    swc_rmax,
                    meas_ks,
                },
            );
        }

        info!(n_dates = root_zone.len(), "root zone table derived");
        self.root_zone = root_zone;
        Ok(())
    }
}
