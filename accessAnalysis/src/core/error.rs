#[derive(Debug, Clone, PartialEq)]
pub enum DistanceError {
    /// A point is out of range or has a non-finite coordinate.
    /// `index` is the position in the input sequence, when known.
    InvalidPoint {
        index: Option<usize>,
        latitude: f64,
        longitude: f64,
    },
    /// Fewer than two points where an average distance to others is requested.
    EmptyInput { points: usize },
    /// Every peer of the point at `index` shares its coordinates and was
    /// deduplicated away, out of `points` in the input.
    NoPeers { index: usize, points: usize },
    /// Sphere radius must be finite and positive.
    InvalidRadius(f64),
}

impl DistanceError {
    pub fn with_index(self, index: usize) -> Self {
        match self {
            DistanceError::InvalidPoint { latitude, longitude, .. } => DistanceError::InvalidPoint {
                index: Some(index),
                latitude,
                longitude,
            },
            other => other,
        }
    }
}

impl std::fmt::Display for DistanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceError::InvalidPoint { index: Some(i), latitude, longitude } => {
                write!(f, "Invalid point at index {}: ({}, {})", i, latitude, longitude)
            }
            DistanceError::InvalidPoint { index: None, latitude, longitude } => {
                write!(f, "Invalid point: ({}, {})", latitude, longitude)
            }
            DistanceError::EmptyInput { points } => write!(
                f,
                "Average distance needs at least two points, got {}",
                points
            ),
            DistanceError::NoPeers { index, points } => write!(
                f,
                "Point at index {} has no peers with distinct coordinates among {} points",
                index, points
            ),
            DistanceError::InvalidRadius(r) => write!(f, "Invalid sphere radius: {}", r),
        }
    }
}

impl std::error::Error for DistanceError {}
