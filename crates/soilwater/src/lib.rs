//! # demeter-soilwater
//!
//! Measured soil-water observations for FAO-56 crop-water-balance modeling:
//! layered volumetric content and deficit tables with fixed-layout text file
//! I/O, and derivation of root-zone soil-water deficit and the measured crop
//! stress coefficient (Ks) from the output of an external water-balance
//! model.

mod date;
mod error;
mod files;
mod model;
mod root_zone;
mod soil_water;
mod table;

pub use date::DateKey;
pub use error::SoilWaterError;
pub use files::FileKind;
pub use model::{FieldCapacity, ModelOutputs, SimRecord};
pub use root_zone::{RootZoneRecord, RootZoneTable};
pub use soil_water::SoilWater;
pub use table::LayerTable;
