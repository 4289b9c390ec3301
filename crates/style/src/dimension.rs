//! Paper sizes for the label sheet.
use labelsheet_types::Size;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeMap};

/// A sheet of paper. Custom sizes are given in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Page dimensions in PDF points.
    pub fn size_pt(&self) -> Size {
        match self {
            PageSize::A4 => Size::new(595.28, 841.89),
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::Legal => Size::new(612.0, 1008.0),
            PageSize::Custom { width, height } => Size::from_mm(*width, *height),
        }
    }

    /// Parse a page size name (e.g., "A4", "Letter", "Legal")
    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_sizes_deserialize() {
        let size: PageSize = serde_json::from_str("\"a4\"").unwrap();
        assert_eq!(size, PageSize::A4);
        let size: PageSize = serde_json::from_str("\"Letter\"").unwrap();
        assert_eq!(size.size_pt(), Size::new(612.0, 792.0));
        assert!(serde_json::from_str::<PageSize>("\"B5\"").is_err());
    }

    #[test]
    fn test_custom_size_is_millimetres() {
        let size: PageSize = serde_json::from_str(r#"{"width": 100, "height": 150}"#).unwrap();
        assert_eq!(size, PageSize::Custom { width: 100.0, height: 150.0 });
        let pt = size.size_pt();
        assert!((pt.width - 283.46).abs() < 0.01);
        assert!((pt.height - 425.2).abs() < 0.01);
    }

    #[test]
    fn test_serialize_round_trip_shape() {
        assert_eq!(serde_json::to_string(&PageSize::A4).unwrap(), "\"A4\"");
        let json = serde_json::to_string(&PageSize::Custom { width: 1.0, height: 2.0 }).unwrap();
        assert_eq!(json, r#"{"width":1.0,"height":2.0}"#);
    }
}
