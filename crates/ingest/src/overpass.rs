//! Overpass API client: query construction and the blocking fetch.

use std::collections::HashMap;
use std::io::Read;

use bevy_log::{debug, info};
use serde::Deserialize;

use crate::error::IngestError;
use crate::normalize::{normalize_elements, BuildingRecord};

pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_LIMIT: usize = 800;

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// `south,west,north,east`, the order Overpass filters expect.
    fn overpass_filter(&self) -> String {
        format!("{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

/// Overpass QL for every building way and relation inside `bbox`, with tags and geometry.
pub fn overpass_query(bbox: &BoundingBox) -> String {
    let filter = bbox.overpass_filter();
    format!(
        "[out:json][timeout:25];(way[\"building\"]({filter});relation[\"building\"]({filter}););out tags geom;"
    )
}

/// A vertex of an element's inline geometry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// One raw element of an Overpass response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub geometry: Option<Vec<GeoPoint>>,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// Decode an Overpass JSON body into its elements as it streams in. A body
/// without an `elements` array yields none.
pub fn read_response(reader: impl Read) -> Result<Vec<OverpassElement>, IngestError> {
    let response: OverpassResponse = serde_json::from_reader(reader)?;
    Ok(response.elements)
}

pub fn parse_response(body: &str) -> Result<Vec<OverpassElement>, IngestError> {
    read_response(body.as_bytes())
}

/// Fetch and normalize the buildings inside `bbox`, keeping at most `limit` elements.
pub fn fetch_buildings(
    bbox: &BoundingBox,
    limit: usize,
) -> Result<Vec<BuildingRecord>, IngestError> {
    let query = overpass_query(bbox);
    debug!("Overpass query: {query}");

    let response = ureq::post(OVERPASS_URL)
        .set("Content-Type", "text/plain;charset=UTF-8")
        .send_string(&query)?;
    // No size cap: large boxes are trimmed to `limit` after decoding.
    let elements = read_response(response.into_reader())?;
    let records = normalize_elements(elements, limit);
    info!("Overpass returned {} buildings", records.len());
    Ok(records)
}
