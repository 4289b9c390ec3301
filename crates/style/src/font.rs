use serde::{Deserialize, Deserializer, Serialize, de};

/// Weight of a text run. Labels only distinguish regular from bold.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl FontWeight {
    /// Parse a font weight from a string ("bold", "regular" or "normal").
    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "regular" | "normal" => Ok(FontWeight::Regular),
            "bold" => Ok(FontWeight::Bold),
            _ => Err(format!("Invalid font weight: '{}'", s)),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weights() {
        let w: FontWeight = serde_json::from_str("\"bold\"").unwrap();
        assert_eq!(w, FontWeight::Bold);
        let w: FontWeight = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(w, FontWeight::Regular);
        let w: FontWeight = serde_json::from_str("\"Regular\"").unwrap();
        assert_eq!(w, FontWeight::Regular);
        assert!(serde_json::from_str::<FontWeight>("\"heavy\"").is_err());
        assert!(serde_json::from_str::<FontWeight>("700").is_err());
    }
}
