//! Building-footprint ingestion from OpenStreetMap.
//!
//! Queries the Overpass API for building ways and relations inside a bounding
//! box and normalizes them into closed GeoJSON footprints with a centroid and
//! an estimated height.

pub mod error;
pub mod normalize;
pub mod overpass;

pub use error::IngestError;
pub use normalize::{normalize_elements, BuildingRecord, Footprint};
pub use overpass::{fetch_buildings, overpass_query, BoundingBox, DEFAULT_LIMIT};
