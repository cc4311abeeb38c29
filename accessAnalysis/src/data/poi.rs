use serde::{Deserialize, Serialize};
use crate::config::constants::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::core::error::DistanceError;

/// A latitude/longitude pair in degrees.
///
/// `GeoPoint::new` rejects out-of-range and non-finite coordinates. Values
/// that arrive through deserialization are checked again by `validate`
/// before any distance is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DistanceError> {
        let point = Self { latitude, longitude };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> Result<(), DistanceError> {
        let lat_ok = self.latitude.is_finite()
            && (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude);
        let lon_ok = self.longitude.is_finite()
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude);

        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(DistanceError::InvalidPoint {
                index: None,
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    pub fn same_coordinates(&self, other: &GeoPoint) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

pub trait POI {
    fn get_point(&self) -> Option<&GeoPoint>;
    fn get_id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_and_non_finite() {
        assert!(GeoPoint::new(90.0001, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn deserialized_points_are_rechecked() {
        let point: GeoPoint = serde_json::from_str(r#"{"latitude": 120.0, "longitude": 0.0}"#).unwrap();
        assert!(point.validate().is_err());
    }
}
