//! Root-zone summary records derived from layered measurements.

use std::collections::BTreeMap;

use crate::date::DateKey;

/// Derived root-zone soil-water summary for one measurement date.
#[derive(Debug, Clone, PartialEq)]
pub struct RootZoneRecord {
    /// Simulated root depth (m).
    pub zr: f64,
    /// Measured soil-water deficit in the active root zone (mm).
    pub swd_r: f64,
    /// Measured soil-water deficit in the maximum root zone (mm).
    pub swd_rmax: f64,
    /// Measured soil-water content in the active root zone (mm).
    pub swc_r: f64,
    /// Measured soil-water content in the maximum root zone (mm).
    pub swc_rmax: f64,
    /// Measured crop stress coefficient, clamped to [0, 1].
    pub meas_ks: f64,
}

/// Root-zone summaries keyed by measurement date.
pub type RootZoneTable = BTreeMap<DateKey, RootZoneRecord>;
