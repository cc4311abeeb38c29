use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use csv::ReaderBuilder;
use serde::Serialize;
use tracing::{info, warn};
use crate::config::constants::MISSING_VALUE_MARKERS;
use crate::data::address::{clean_address, SubstitutionRule};
use crate::data::poi::GeoPoint;
use crate::models::location::Location;
use crate::utils::logging::{self, DataLoadType, OperationCategory};

#[derive(Debug)]
pub enum LocationLoadError {
    IoError(std::io::Error),
    CsvError(csv::Error),
    MissingColumn(String),
    InvalidCoordinate(String),
}

impl From<std::io::Error> for LocationLoadError {
    fn from(err: std::io::Error) -> Self {
        LocationLoadError::IoError(err)
    }
}

impl From<csv::Error> for LocationLoadError {
    fn from(err: csv::Error) -> Self {
        LocationLoadError::CsvError(err)
    }
}

impl std::fmt::Display for LocationLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationLoadError::IoError(e) => write!(f, "IO error: {}", e),
            LocationLoadError::CsvError(e) => write!(f, "CSV error: {}", e),
            LocationLoadError::MissingColumn(s) => write!(f, "Missing column: {}", s),
            LocationLoadError::InvalidCoordinate(s) => write!(f, "Invalid coordinate: {}", s),
        }
    }
}

impl std::error::Error for LocationLoadError {}

/// How many addresses made it through geocoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GeocodeSummary {
    pub total: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

impl GeocodeSummary {
    pub fn from_locations(locations: &[Location]) -> Self {
        let resolved = locations.iter().filter(|l| l.is_resolved()).count();
        Self {
            total: locations.len(),
            resolved,
            unresolved: locations.len() - resolved,
        }
    }

    /// Fraction of addresses dropped, 0.0 for an empty input.
    pub fn drop_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.unresolved as f64 / self.total as f64
        }
    }
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    MISSING_VALUE_MARKERS.iter().any(|marker| cell.eq_ignore_ascii_case(marker))
}

fn parse_coordinate(cell: &str, column: &str, row: usize) -> Result<f64, LocationLoadError> {
    cell.trim().parse::<f64>().map_err(|_| {
        LocationLoadError::InvalidCoordinate(format!("row {}: unparsable {} '{}'", row, column, cell))
    })
}

pub fn load_locations(
    csv_path: impl AsRef<Path>,
    rules: &[SubstitutionRule],
) -> Result<Vec<Location>, LocationLoadError> {
    let file = File::open(csv_path)?;
    load_locations_from_reader(file, rules)
}

/// Reads `id,name,address,latitude,longitude` records. Only the coordinate
/// columns are required; `id` falls back to the row number.
///
/// An empty or `NA`-style coordinate marks an address that failed to
/// geocode: the row is kept with `point: None`. A present but unparsable or
/// out-of-range coordinate is an error.
pub fn load_locations_from_reader<R: Read>(
    reader: R,
    rules: &[SubstitutionRule],
) -> Result<Vec<Location>, LocationLoadError> {
    let _timing = logging::start_timing("load_locations",
        OperationCategory::DataLoad { subcategory: DataLoadType::Locations });

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let header_map: HashMap<String, usize> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, header)| (header.to_lowercase(), idx))
        .collect();

    let column = |names: &[&str]| names.iter().find_map(|name| header_map.get(*name).copied());

    let lat_index = column(&["latitude", "lat"])
        .ok_or_else(|| LocationLoadError::MissingColumn("latitude".to_string()))?;
    let lon_index = column(&["longitude", "lon", "lng"])
        .ok_or_else(|| LocationLoadError::MissingColumn("longitude".to_string()))?;
    let id_index = column(&["id"]);
    let name_index = column(&["name"]);
    let address_index = column(&["address"]);

    let mut locations = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("");

        let id = match cell(id_index).trim() {
            "" => row.to_string(),
            id => id.to_string(),
        };
        let name = cell(name_index).trim().to_string();
        let address = clean_address(cell(address_index), rules);

        let lat_cell = cell(Some(lat_index));
        let lon_cell = cell(Some(lon_index));

        let point = if is_missing(lat_cell) || is_missing(lon_cell) {
            warn!(row, id = %id, address = %address, "Address was not geocoded, dropping it");
            None
        } else {
            let latitude = parse_coordinate(lat_cell, "latitude", row)?;
            let longitude = parse_coordinate(lon_cell, "longitude", row)?;
            let point = GeoPoint::new(latitude, longitude)
                .map_err(|e| LocationLoadError::InvalidCoordinate(format!("row {}: {}", row, e)))?;
            Some(point)
        };

        locations.push(Location::new(id, name, address, point));
    }

    let summary = GeocodeSummary::from_locations(&locations);
    info!(
        total = summary.total,
        resolved = summary.resolved,
        unresolved = summary.unresolved,
        "Loaded locations, {:.1}% dropped",
        summary.drop_rate() * 100.0
    );

    Ok(locations)
}
