//! Composite measurement date keys in `YYYY-DOY` form.

use std::fmt;
use std::str::FromStr;

use crate::error::SoilWaterError;

/// A measurement date identified by year and day of year.
///
/// Renders as a zero-padded `YYYY-DOY` token (e.g. `2023-045`), the key form
/// shared by the measured-data files and the model output table. Ordering is
/// chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    year: u16,
    doy: u16,
}

impl DateKey {
    /// Create a date key.
    ///
    /// # Errors
    ///
    /// Returns [`SoilWaterError::InvalidDate`] if `doy` is outside 1..=366.
    pub fn new(year: u16, doy: u16) -> Result<Self, SoilWaterError> {
        if doy == 0 || doy > 366 {
            return Err(SoilWaterError::InvalidDate {
                token: format!("{year:04}-{doy:03}"),
            });
        }
        Ok(Self { year, doy })
    }

    /// 4-digit year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Day of year, 1..=366.
    pub fn doy(&self) -> u16 {
        self.doy
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:03}", self.year, self.doy)
    }
}

impl FromStr for DateKey {
    type Err = SoilWaterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SoilWaterError::InvalidDate {
            token: s.to_string(),
        };
        let (year, doy) = s.split_once('-').ok_or_else(invalid)?;
        let year: u16 = year.parse().map_err(|_| invalid())?;
        let doy: u16 = doy.parse().map_err(|_| invalid())?;
        Self::new(year, doy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_zero_pads() {
        let d = DateKey::new(2023, 45).unwrap();
        assert_eq!(d.to_string(), "2023-045");
    }

    #[test]
    fn test_parse_round_trip() {
        let d: DateKey = "2022-158".parse().unwrap();
        assert_eq!(d.year(), 2022);
        assert_eq!(d.doy(), 158);
        assert_eq!(d.to_string(), "2022-158");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a: DateKey = "2022-300".parse().unwrap();
        let b: DateKey = "2023-001".parse().unwrap();
        let c: DateKey = "2023-045".parse().unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_invalid_tokens() {
        assert!("2023".parse::<DateKey>().is_err());
        assert!("2023-abc".parse::<DateKey>().is_err());
        assert!("2023-000".parse::<DateKey>().is_err());
        assert!("2023-367".parse::<DateKey>().is_err());
    }
}
