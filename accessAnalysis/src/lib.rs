// Main module declarations for geoaccess

// Distance engine
pub mod core {
    pub mod distance;
    pub mod matrix;
    pub mod accessibility;
    pub mod error;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod analysis_config;
}

// Model definitions
pub mod models {
    pub mod location;
}

// Data loaders
pub mod data {
    pub mod poi;
    pub mod address;
    pub mod locations_loader;
}

// Analysis pipeline and reporting
pub mod analysis {
    pub mod pipeline;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::core::distance::{distance, DistanceFormula, DistanceUnit};
pub use crate::core::matrix::{distance_matrix, DistanceMatrix};
pub use crate::core::accessibility::{average_distances, streaming_average_distances, AccessibilityScore};
pub use crate::core::error::DistanceError;
pub use crate::data::poi::GeoPoint;
