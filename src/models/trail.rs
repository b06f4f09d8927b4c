//! Trail records returned by the trail-search service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Trail difficulty as encoded by the trail-search service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Green,
    GreenBlue,
    Blue,
    BlueBlack,
    Black,
}

impl Difficulty {
    /// Parse a difficulty code such as `"blueBlack"`
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "green" => Some(Self::Green),
            "greenBlue" => Some(Self::GreenBlue),
            "blue" => Some(Self::Blue),
            "blueBlack" => Some(Self::BlueBlack),
            "black" => Some(Self::Black),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::GreenBlue => "greenBlue",
            Self::Blue => "blue",
            Self::BlueBlack => "blueBlack",
            Self::Black => "black",
        }
    }

    /// Human readable label shown next to a trail
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Green => "Easy",
            Self::GreenBlue => "Easy/Moderate",
            Self::Blue => "Moderate",
            Self::BlueBlack => "Moderate/Difficult",
            Self::Black => "Difficult",
        }
    }

    /// All known difficulties, easiest first
    #[must_use]
    pub fn all() -> [Self; 5] {
        [
            Self::Green,
            Self::GreenBlue,
            Self::Blue,
            Self::BlueBlack,
            Self::Black,
        ]
    }
}

/// Convert a difficulty code to its label, `"Unknown"` for codes outside the table
#[must_use]
pub fn difficulty_label(code: &str) -> &'static str {
    Difficulty::from_code(code).map_or("Unknown", Difficulty::label)
}

/// A single trail record
///
/// The record is kept exactly as the service sent it, explicit `null`s and
/// fields this application never reads included. Accessors read the fields
/// the pages need and tolerate missing, `null` or oddly typed values.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct TrailResult(Map<String, Value>);

impl TrailResult {
    /// Raw value of `key`, `None` when absent
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Numbers may arrive as JSON numbers or numeric strings
    fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(Value::as_i64)
    }

    /// Trail name, empty when the record has none
    #[must_use]
    pub fn name(&self) -> &str {
        self.text("name").unwrap_or_default()
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.text("url")
    }

    /// Free-text location such as "Mill Valley, California"
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.text("location")
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.text("summary")
    }

    /// Length in miles
    #[must_use]
    pub fn length(&self) -> Option<f64> {
        self.number("length")
    }

    /// Total ascent in feet
    #[must_use]
    pub fn ascent(&self) -> Option<f64> {
        self.number("ascent")
    }

    /// Total descent in feet (negative)
    #[must_use]
    pub fn descent(&self) -> Option<f64> {
        self.number("descent")
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<&str> {
        self.text("difficulty")
    }

    #[must_use]
    pub fn condition_status(&self) -> Option<&str> {
        self.text("conditionStatus")
    }

    #[must_use]
    pub fn condition_details(&self) -> Option<&str> {
        self.text("conditionDetails")
    }

    /// Label for this trail's difficulty code
    #[must_use]
    pub fn difficulty_label(&self) -> &'static str {
        self.difficulty().map_or("Unknown", difficulty_label)
    }

    /// Coordinates of the trailhead, if the record carries both
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.number("latitude")?, self.number("longitude")?))
    }
}

impl From<Map<String, Value>> for TrailResult {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Body of a successful trail-search response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TrailSearchPayload {
    pub trails: Vec<TrailResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<Value>,
}

/// Parsed trail-search body together with the exact text it was parsed from
#[derive(Debug, Clone, PartialEq)]
pub struct TrailSearchReply {
    pub payload: TrailSearchPayload,
    pub raw: String,
}

impl TrailSearchReply {
    /// Parse a raw response body
    pub fn parse(raw: String) -> serde_json::Result<Self> {
        let payload = serde_json::from_str(&raw)?;
        Ok(Self { payload, raw })
    }
}
