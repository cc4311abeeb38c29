// Sphere radii used as output units
pub const EARTH_RADIUS_MILES: f64 = 3959.0;
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// Valid coordinate ranges (degrees)
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

// Above this many points the pipeline reduces row by row instead of building the matrix
pub const DEFAULT_STREAMING_THRESHOLD: usize = 2000;

// Coordinate cells that mean "address failed to geocode"
pub const MISSING_VALUE_MARKERS: [&str; 4] = ["", "NA", "N/A", "NaN"];

// Progress bar is only drawn for runs at least this large
pub const PROGRESS_BAR_MIN_POINTS: usize = 500;

pub const OUTPUT_FILE_NAME: &str = "accessibility_scores.csv";
