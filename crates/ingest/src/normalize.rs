//! Raw Overpass elements → normalized building records.

use serde::{Deserialize, Serialize};

use crate::overpass::OverpassElement;

/// Metres per storey when only `building:levels` is known.
pub const METRES_PER_LEVEL: f64 = 3.0;

/// Minimum number of geometry points for an element to count as a footprint.
const MIN_RING_POINTS: usize = 4;

/// GeoJSON polygon with a single closed outer ring of `[lon, lat]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Footprint {
    pub fn polygon(ring: Vec<[f64; 2]>) -> Self {
        Self {
            kind: "Polygon".into(),
            coordinates: vec![ring],
        }
    }

    pub fn ring(&self) -> &[[f64; 2]] {
        self.coordinates.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRecord {
    pub osm_type: String,
    /// `"<type>/<id>"`, e.g. `"way/123"`.
    pub osm_id: String,
    pub name: Option<String>,
    pub levels: Option<i64>,
    pub height_m: Option<f64>,
    pub footprint_geo_json: Footprint,
    pub centroid_lon: f64,
    pub centroid_lat: f64,
}

/// Normalize at most `limit` elements, skipping those without a usable footprint.
pub fn normalize_elements(elements: Vec<OverpassElement>, limit: usize) -> Vec<BuildingRecord> {
    elements
        .into_iter()
        .take(limit)
        .filter_map(normalize_element)
        .collect()
}

pub fn normalize_element(element: OverpassElement) -> Option<BuildingRecord> {
    let geometry = element.geometry.as_ref()?;
    if geometry.len() < MIN_RING_POINTS {
        return None;
    }

    let mut ring: Vec<[f64; 2]> = geometry.iter().map(|p| [p.lon, p.lat]).collect();
    let first = ring[0];
    if ring.last() != Some(&first) {
        ring.push(first);
    }

    // Mean over every stored point, closing point included.
    let n = ring.len() as f64;
    let (sum_lon, sum_lat) = ring
        .iter()
        .fold((0.0, 0.0), |(lon, lat), p| (lon + p[0], lat + p[1]));

    let tag = |key: &str| element.tags.get(key).map(String::as_str).unwrap_or("");
    let levels = parse_leading_int(tag("building:levels"));
    let height_m = parse_leading_float(&tag("height").replacen('m', "", 1))
        .or_else(|| levels.map(|l| l as f64 * METRES_PER_LEVEL));

    Some(BuildingRecord {
        osm_id: format!("{}/{}", element.kind, element.id),
        name: element.tags.get("name").filter(|s| !s.is_empty()).cloned(),
        levels,
        height_m,
        footprint_geo_json: Footprint::polygon(ring),
        centroid_lon: sum_lon / n,
        centroid_lat: sum_lat / n,
        osm_type: element.kind,
    })
}

/// Longest prefix of `s` (after leading whitespace) that is an optionally
/// signed integer, e.g. `"9"`, `"5;6"` → 5, `"abc"` → `None`.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// Longest prefix of `s` (after leading whitespace) that is a decimal number
/// with optional sign, fraction and exponent, e.g. `"12.5 "` → 12.5.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
