//! Fixed-layout text formats for measured soil-water files.
//!
//! Every file carries a five-line header: a banner line, the toolkit title,
//! a table title, another banner line, and the column-header line. Data rows
//! follow, whitespace-delimited on read and fixed-width on write.

use std::fs;
use std::path::Path;

use crate::date::DateKey;
use crate::error::SoilWaterError;
use crate::root_zone::{RootZoneRecord, RootZoneTable};
use crate::table::LayerTable;

/// Number of header lines preceding the data rows.
pub(crate) const N_HEADER_LINES: usize = 5;

const BANNER: &str =
    "************************************************************************";
const TITLE: &str = "demeter: FAO-56 Crop Water Balance Tools";

const ROOT_ZONE_COLUMNS: &str = "Year DOY    Zr    SWDr SWDrmax    SWCr SWCrmax MeasKs";

/// The three measured soil-water file kinds, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Volumetric soil-water content by layer (`.vswc`).
    Content,
    /// Fractional soil-water deficit by layer (`.vswd`).
    Deficit,
    /// Root-zone summary by date (`.rzsw`).
    RootZone,
}

impl FileKind {
    /// Determine the file kind from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns [`SoilWaterError::UnsupportedExtension`] for anything other
    /// than `vswc`, `vswd`, or `rzsw` (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, SoilWaterError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("vswc") => Ok(Self::Content),
            Some("vswd") => Ok(Self::Deficit),
            Some("rzsw") => Ok(Self::RootZone),
            _ => Err(SoilWaterError::UnsupportedExtension {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Table title written on header line 3.
    fn table_title(&self) -> &'static str {
        match self {
            Self::Content => "Tools: Measured Soil Water Content (cm^3/cm^3) Data by Layer",
            Self::Deficit => "Tools: Measured Soil Water Deficit (cm^3/cm^3) Data by Layer",
            Self::RootZone => "Tools: Simulated Root Zone (m) & Measured Soil Water (mm) Data",
        }
    }
}

fn io_err(path: &Path, source: std::io::Error) -> SoilWaterError {
    SoilWaterError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> SoilWaterError {
    SoilWaterError::Malformed {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

/// Parse a float token, mapping failures to [`SoilWaterError::Malformed`].
/// `NaN` parses as a missing value.
pub(crate) fn parse_f64(token: &str, path: &Path, line: usize) -> Result<f64, SoilWaterError> {
    token
        .parse()
        .map_err(|_| malformed(path, line, format!("invalid number '{token}'")))
}

/// Rebuild a [`DateKey`] from separate year and day-of-year row tokens.
pub(crate) fn parse_date_row_key(
    year: &str,
    doy: &str,
    path: &Path,
    line: usize,
) -> Result<DateKey, SoilWaterError> {
    let year: u16 = year
        .parse()
        .map_err(|_| malformed(path, line, format!("invalid year '{year}'")))?;
    let doy: u16 = doy
        .parse()
        .map_err(|_| malformed(path, line, format!("invalid day of year '{doy}'")))?;
    DateKey::new(year, doy)
}

fn read_lines(path: &Path) -> Result<Vec<String>, SoilWaterError> {
    let text = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Read a layered measurement table (vswc/vswd layout).
pub(crate) fn read_layer_table(path: &Path) -> Result<LayerTable, SoilWaterError> {
    let lines = read_lines(path)?;
    if lines.len() < N_HEADER_LINES {
        return Err(malformed(
            path,
            lines.len(),
            format!("file has fewer than {N_HEADER_LINES} header lines"),
        ));
    }

    // Line 5 is "Depth" followed by one YYYY-DOY token per column.
    let dates: Vec<DateKey> = lines[N_HEADER_LINES - 1]
        .split_whitespace()
        .skip(1)
        .map(|t| t.parse())
        .collect::<Result<_, _>>()?;
    let n_cols = dates.len();

    let mut table = LayerTable::with_dates(dates);
    for (idx, line) in lines.iter().enumerate().skip(N_HEADER_LINES) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != n_cols + 1 {
            return Err(malformed(
                path,
                line_no,
                format!("expected {} columns, got {}", n_cols + 1, tokens.len()),
            ));
        }
        let depth: u32 = tokens[0]
            .parse()
            .map_err(|_| malformed(path, line_no, format!("invalid depth '{}'", tokens[0])))?;
        let values = tokens[1..]
            .iter()
            .map(|t| parse_f64(t, path, line_no))
            .collect::<Result<Vec<f64>, _>>()?;
        table.insert_row(depth, values)?;
    }

    Ok(table)
}

/// Write a layered measurement table (vswc/vswd layout).
pub(crate) fn write_layer_table(
    path: &Path,
    table: &LayerTable,
    kind: FileKind,
) -> Result<(), SoilWaterError> {
    let mut s = String::new();
    s.push_str(BANNER);
    s.push('\n');
    s.push_str(TITLE);
    s.push('\n');
    s.push_str(kind.table_title());
    s.push('\n');
    s.push_str(BANNER);
    s.push('\n');

    s.push_str("Depth");
    for date in table.dates() {
        s.push_str(&format!("{:>9}", date.to_string()));
    }
    s.push('\n');

    for (depth, values) in table.rows() {
        s.push_str(&format!("{depth:5}"));
        for v in values {
            s.push_str(&format!("{v:9.3}"));
        }
        s.push('\n');
    }

    fs::write(path, s).map_err(|e| io_err(path, e))
}

/// Read a root-zone summary table (rzsw layout).
pub(crate) fn read_root_zone(path: &Path) -> Result<RootZoneTable, SoilWaterError> {
    let lines = read_lines(path)?;
    if lines.len() < N_HEADER_LINES {
        return Err(malformed(
            path,
            lines.len(),
            format!("file has fewer than {N_HEADER_LINES} header lines"),
        ));
    }

    let mut table = RootZoneTable::new();
    for (idx, line) in lines.iter().enumerate().skip(N_HEADER_LINES) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 8 {
            return Err(malformed(
                path,
                line_no,
                format!("expected 8 columns, got {}", tokens.len()),
            ));
        }
        let date = parse_date_row_key(tokens[0], tokens[1], path, line_no)?;
        let fields = tokens[2..]
            .iter()
            .map(|t| parse_f64(t, path, line_no))
            .collect::<Result<Vec<f64>, _>>()?;
        table.insert(
            date,
            RootZoneRecord {
                zr: fields[0],
                swd_r: fields[1],
                swd_rmax: fields[2],
                swc_r: fields[3],
                swc_rmax: fields[4],
                meas_ks: fields[5],
            },
        );
    }

    Ok(table)
}

/// Write a root-zone summary table (rzsw layout).
pub(crate) fn write_root_zone(path: &Path, table: &RootZoneTable) -> Result<(), SoilWaterError> {
    let mut s = String::new();
    s.push_str(BANNER);
    s.push('\n');
    s.push_str(TITLE);
    s.push('\n');
    s.push_str(FileKind::RootZone.table_title());
    s.push('\n');
    s.push_str(BANNER);
    s.push('\n');
    s.push_str(ROOT_ZONE_COLUMNS);
    s.push('\n');

    for (date, rec) in table {
        s.push_str(&format!(
            "{:4} {:03} {:5.3} {:7.3} {:7.3} {:7.3} {:7.3} {:6.3}\n",
            date.year(),
            date.doy(),
            rec.zr,
            rec.swd_r,
            rec.swd_rmax,
            rec.swc_r,
            rec.swc_rmax,
            rec.meas_ks,
        ));
    }

    fs::write(path, s).map_err(|e| io_err(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_path() {
        assert_eq!(
            FileKind::from_path(Path::new("plot.vswc")).unwrap(),
            FileKind::Content
        );
        assert_eq!(
            FileKind::from_path(Path::new("plot.VSWD")).unwrap(),
            FileKind::Deficit
        );
        assert_eq!(
            FileKind::from_path(Path::new("data/plot.rzsw")).unwrap(),
            FileKind::RootZone
        );
    }

    #[test]
    fn test_file_kind_rejects_unknown_extension() {
        assert!(matches!(
            FileKind::from_path(Path::new("plot.csv")),
            Err(SoilWaterError::UnsupportedExtension { .. })
        ));
        assert!(matches!(
            FileKind::from_path(Path::new("plot")),
            Err(SoilWaterError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn test_parse_f64_accepts_nan() {
        let path = Path::new("x.vswc");
        assert!(parse_f64("NaN", path, 6).unwrap().is_nan());
        assert_eq!(parse_f64("0.315", path, 6).unwrap(), 0.315);
        assert!(parse_f64("o.315", path, 6).is_err());
    }

    #[test]
    fn test_read_layer_table_from_text() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("plot.vswc");
        let text = format!(
            "{0}\n{1}\n{2}\n{0}\n\
             Depth 2022-158 2022-172\n\
             \x20  15    0.310    0.290\n\
             \x20  30    0.280      NaN\n",
            BANNER,
            TITLE,
            FileKind::Content.table_title(),
        );
        fs::write(&path, text).unwrap();

        let table = read_layer_table(&path).unwrap();
        assert_eq!(table.n_layers(), 2);
        let d = "2022-172".parse().unwrap();
        assert_eq!(table.value(15, &d), Some(0.29));
        assert!(table.value(30, &d).unwrap().is_nan());
    }

    #[test]
    fn test_read_layer_table_reports_bad_row() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("plot.vswc");
        let text = format!(
            "{0}\n{1}\n{2}\n{0}\nDepth 2022-158\n   15    0.310\n   30\n",
            BANNER,
            TITLE,
            FileKind::Content.table_title(),
        );
        fs::write(&path, text).unwrap();

        let err = read_layer_table(&path).unwrap_err();
        assert!(matches!(err, SoilWaterError::Malformed { line: 7, .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_layer_table(Path::new("/nonexistent/plot.vswc")).unwrap_err();
        assert!(matches!(err, SoilWaterError::Io { .. }));
    }
}
