use std::fmt;

use serde::{Deserialize, Serialize};

/// Floor designation of a cadastral object.
///
/// Building storeys are numbered; parking levels and ground-level objects
/// carry a textual designation such as `"-1"` or `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FloorLabel {
    Level(i32),
    Text(String),
}

impl fmt::Display for FloorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorLabel::Level(n) => write!(f, "{n}"),
            FloorLabel::Text(s) => f.write_str(s),
        }
    }
}

/// Inspectable record attached 1:1 to a clickable entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    pub cadastral_number: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub floor: Option<FloorLabel>,
    pub area: Option<String>,
    pub address: Option<String>,
}

impl ObjectMetadata {
    pub fn new(cadastral_number: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            cadastral_number: cadastral_number.into(),
            kind: kind.into(),
            floor: None,
            area: None,
            address: None,
        }
    }

    pub fn with_floor(mut self, floor: FloorLabel) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Formats a square-metre area the way the cadastral panel shows it.
pub fn format_area(square_metres: f32) -> String {
    format!("{square_metres} м²")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_area_drops_trailing_zero_fraction() {
        assert_eq!(format_area(26.0 * 18.0), "468 м²");
        assert_eq!(format_area(12.5), "12.5 м²");
    }

    #[test]
    fn test_floor_label_display() {
        assert_eq!(FloorLabel::Level(3).to_string(), "3");
        assert_eq!(FloorLabel::Text("-1".into()).to_string(), "-1");
    }

    #[test]
    fn test_metadata_serializes_with_original_keys() {
        let meta = ObjectMetadata::new("68:25:0000000:201-1", "Жилой дом")
            .with_floor(FloorLabel::Level(1))
            .with_area("468 м²");
        let json = serde_json::to_value(&meta).expect("serializable");
        assert_eq!(json["cadastralNumber"], "68:25:0000000:201-1");
        assert_eq!(json["type"], "Жилой дом");
        assert_eq!(json["floor"], 1);
        assert!(json["address"].is_null());
    }
}
