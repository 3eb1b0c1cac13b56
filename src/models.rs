use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column headers the sampling dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Lat", "Lon", "P/GW", "TIPO", "OXIG_18", "DEUT_2H"];

/// One groundwater sampling site (one row of the dataset).
///
/// Identity is the row position in the loaded dataset; selection events refer
/// to records by that position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleRecord {
    #[serde(rename = "Lat", deserialize_with = "de_f64_or_nan")]
    pub lat: f64,
    #[serde(rename = "Lon", deserialize_with = "de_f64_or_nan")]
    pub lon: f64,
    /// Precipitation / groundwater ratio, drives the map color.
    #[serde(rename = "P/GW", deserialize_with = "de_f64_or_nan")]
    pub ratio: f64,
    /// Categorical site type (well, spring, ...).
    #[serde(rename = "TIPO")]
    pub kind: String,
    /// δ¹⁸O in ‰ VSMOW.
    #[serde(rename = "OXIG_18", deserialize_with = "de_f64_or_nan")]
    pub oxygen_18: f64,
    /// δ²H in ‰ VSMOW.
    #[serde(rename = "DEUT_2H", deserialize_with = "de_f64_or_nan")]
    pub deuterium: f64,
}

/// Serde helper: parse `f64` from a number or a numeric string. Blank cells
/// become NaN so the row keeps its position.
fn de_f64_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number, a numeric string or an empty cell")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                return Ok(f64::NAN);
            }
            s.parse::<f64>().map_err(E::custom)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(f64::NAN)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(f64::NAN)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}

/// A point reported by the map panel's selection event.
///
/// Only `pointNumber` matters here; the rest of the payload (coordinates,
/// curve number, ...) is carried along untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SelectedPoint {
    #[serde(rename = "pointNumber", default, skip_serializing_if = "Option::is_none")]
    pub point_number: Option<Value>,
    #[serde(rename = "curveNumber", default, skip_serializing_if = "Option::is_none")]
    pub curve_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<Value>,
}

impl SelectedPoint {
    pub fn at(index: usize) -> Self {
        Self {
            point_number: Some(Value::from(index as u64)),
            ..Default::default()
        }
    }

    /// The referenced row position, if the identifier is a non-negative integer.
    pub fn index(&self) -> Option<usize> {
        self.point_number
            .as_ref()
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
    }
}

/// Selection event payload emitted by the map panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SelectionEvent {
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub points: Vec<SelectedPoint>,
}

/// Serde helper: `"points": null` reads as an empty list.
fn de_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SelectionEvent {
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            points: indices.into_iter().map(SelectedPoint::at).collect(),
        }
    }

    /// Parse a raw JSON payload. `null` means "no selection".
    pub fn from_json(payload: &str) -> serde_json::Result<Option<Self>> {
        serde_json::from_str(payload)
    }
}

/// Ordered set of row positions. Empty means "no filter, show every record".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection(Vec<usize>);

impl Selection {
    /// The "show all" selection.
    pub fn all() -> Self {
        Self(Vec::new())
    }

    /// Build a selection from raw positions, collapsing duplicates (first
    /// occurrence wins).
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut out: Vec<usize> = Vec::new();
        for i in indices {
            if !out.contains(&i) {
                out.push(i);
            }
        }
        Self(out)
    }

    /// Resolve an event payload against a dataset of `len` records.
    ///
    /// Identifiers that are missing, malformed or out of range are dropped.
    /// Returns the selection and the number of dropped identifiers.
    pub fn from_event(event: Option<&SelectionEvent>, len: usize) -> (Self, usize) {
        let Some(event) = event else {
            return (Self::all(), 0);
        };
        let mut dropped = 0usize;
        let valid = event.points.iter().filter_map(|p| match p.index() {
            Some(i) if i < len => Some(i),
            _ => {
                dropped += 1;
                None
            }
        });
        let selection = Self::from_indices(valid.collect::<Vec<_>>());
        (selection, dropped)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}
