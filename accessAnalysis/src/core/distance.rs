use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::config::constants::{EARTH_RADIUS_KM, EARTH_RADIUS_MILES};
use crate::core::error::DistanceError;
use crate::data::poi::GeoPoint;

/// Spherical approximation used for great-circle distance.
///
/// `Haversine` is stable for both very short and very long distances and is
/// the default. `SphericalLawOfCosines` is cheaper but loses precision for
/// points a few metres apart and for near-antipodal pairs, where small
/// rounding errors in the `acos` argument are amplified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceFormula {
    #[default]
    Haversine,
    SphericalLawOfCosines,
}

impl fmt::Display for DistanceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceFormula::Haversine => write!(f, "haversine"),
            DistanceFormula::SphericalLawOfCosines => write!(f, "spherical_law_of_cosines"),
        }
    }
}

impl FromStr for DistanceFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "haversine" => Ok(DistanceFormula::Haversine),
            "cosines" | "cosine" | "law_of_cosines" | "spherical_law_of_cosines" => {
                Ok(DistanceFormula::SphericalLawOfCosines)
            }
            _ => Err(format!("Unknown distance formula: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
}

impl DistanceUnit {
    pub fn earth_radius(&self) -> f64 {
        match self {
            DistanceUnit::Miles => EARTH_RADIUS_MILES,
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnit::Miles => write!(f, "miles"),
            DistanceUnit::Kilometers => write!(f, "kilometers"),
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Ok(DistanceUnit::Kilometers),
            _ => Err(format!("Unknown distance unit: {}", s)),
        }
    }
}

pub fn validate_radius(radius: f64) -> Result<(), DistanceError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(DistanceError::InvalidRadius(radius))
    }
}

/// Great-circle distance between `a` and `b` on a sphere of `radius`.
/// The result is in whatever unit `radius` is expressed in.
pub fn distance(
    a: &GeoPoint,
    b: &GeoPoint,
    formula: DistanceFormula,
    radius: f64,
) -> Result<f64, DistanceError> {
    a.validate()?;
    b.validate()?;
    validate_radius(radius)?;
    Ok(great_circle(a, b, formula, radius))
}

// Callers must have validated both points and the radius.
pub(crate) fn great_circle(a: &GeoPoint, b: &GeoPoint, formula: DistanceFormula, radius: f64) -> f64 {
    if a.same_coordinates(b) {
        return 0.0;
    }

    match formula {
        DistanceFormula::Haversine => haversine(a, b, radius),
        DistanceFormula::SphericalLawOfCosines => law_of_cosines(a, b, radius),
    }
}

fn haversine(a: &GeoPoint, b: &GeoPoint, radius: f64) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = lat_b - lat_a;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * radius * h.clamp(0.0, 1.0).sqrt().asin()
}

fn law_of_cosines(a: &GeoPoint, b: &GeoPoint, radius: f64) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let cos_angle = lat_a.sin() * lat_b.sin() + lat_a.cos() * lat_b.cos() * d_lon.cos();

    // Rounding can push the argument just outside [-1, 1]
    radius * cos_angle.clamp(-1.0, 1.0).acos()
}
