//! Normalization of raw dataset records into [`Place`]s.
//!
//! The campus datasets do not agree on field names: some carry flat
//! `lat`/`lng` fields, others a `coords` pair or a `position` object, and the
//! description and image fields have a couple of spellings. Every variant is
//! folded into the canonical `Place` shape here. Records that cannot be
//! normalized are skipped individually and reported, never fatal.

use foundation::geo::LatLng;
use serde_json::{Map, Value};
use tracing::debug;

use crate::loader::LoadError;
use crate::place::{Place, PlaceId};

/// Category assigned to records that do not name one.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Why a single dataset record was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    NotAnObject,
    MissingName,
    MissingPosition,
    MalformedField { field: &'static str },
    InvalidPosition { lat: f64, lng: f64 },
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::NotAnObject => write!(f, "record is not an object"),
            RecordError::MissingName => write!(f, "record has no name"),
            RecordError::MissingPosition => write!(f, "record has no position"),
            RecordError::MalformedField { field } => write!(f, "field `{field}` is not a number"),
            RecordError::InvalidPosition { lat, lng } => {
                write!(f, "position ({lat}, {lng}) is outside the globe")
            }
        }
    }
}

impl std::error::Error for RecordError {}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// 0-based index of the record in the source array.
    pub index: usize,
    pub reason: RecordError,
}

/// Result of normalizing one dataset document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDataset {
    pub places: Vec<Place>,
    pub skipped: Vec<SkippedRecord>,
}

// Accepted spellings per field, in order of preference.
const NAME: &[&str] = &["name"];
const CATEGORY: &[&str] = &["category", "type"];
const LAT: &[&str] = &["lat", "latitude"];
const LNG: &[&str] = &["lng", "longitude", "lon"];
const PAIR: &[&str] = &["coords", "coordinates", "position"];
const DESCRIPTION: &[&str] = &["description", "desc"];
const IMAGE: &[&str] = &["image", "img", "image_url"];

/// First non-null value among `keys`.
fn field<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|v| !v.is_null())
}

/// Parses a dataset document: a top-level JSON array of place records.
///
/// Only a document that is not valid JSON, or whose top level is not an
/// array, is an error. Bad records are collected in
/// [`ParsedDataset::skipped`].
pub fn parse_places(json: &str) -> Result<ParsedDataset, LoadError> {
    let root: Value = serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))?;
    let Value::Array(records) = root else {
        return Err(LoadError::Parse(
            "expected a top-level array of places".to_string(),
        ));
    };

    let mut out = ParsedDataset::default();
    for (index, record) in records.into_iter().enumerate() {
        let id = PlaceId(out.places.len() as u32);
        match normalize_record(id, record) {
            Ok(place) => out.places.push(place),
            Err(reason) => {
                debug!(index, %reason, "skipping dataset record");
                out.skipped.push(SkippedRecord { index, reason });
            }
        }
    }
    Ok(out)
}

/// Normalizes one raw record into a place with the given id.
pub fn normalize_record(id: PlaceId, record: Value) -> Result<Place, RecordError> {
    let Value::Object(record) = record else {
        return Err(RecordError::NotAnObject);
    };

    let name = field(&record, NAME)
        .and_then(text)
        .ok_or(RecordError::MissingName)?;
    let position = position_of(&record)?;
    let category = field(&record, CATEGORY)
        .and_then(text)
        .unwrap_or_else(|| UNCATEGORIZED.to_string());

    Ok(Place {
        id,
        name,
        category,
        position,
        description: field(&record, DESCRIPTION).and_then(text),
        image: field(&record, IMAGE).and_then(text),
    })
}

fn position_of(record: &Map<String, Value>) -> Result<LatLng, RecordError> {
    let (lat, lng) = if let (Some(lat), Some(lng)) = (field(record, LAT), field(record, LNG)) {
        (number(lat, "lat")?, number(lng, "lng")?)
    } else if let Some(pair) = field(record, PAIR) {
        coordinate_pair(pair)?
    } else {
        return Err(RecordError::MissingPosition);
    };

    LatLng::checked(lat, lng).ok_or(RecordError::InvalidPosition { lat, lng })
}

/// Accepts `[lat, lng]` or `{ "lat": .., "lng": .. }` (also `lon`).
fn coordinate_pair(v: &Value) -> Result<(f64, f64), RecordError> {
    match v {
        Value::Array(items) if items.len() == 2 => {
            Ok((number(&items[0], "lat")?, number(&items[1], "lng")?))
        }
        Value::Object(map) => {
            let lat = map.get("lat").ok_or(RecordError::MissingPosition)?;
            let lng = map
                .get("lng")
                .or_else(|| map.get("lon"))
                .ok_or(RecordError::MissingPosition)?;
            Ok((number(lat, "lat")?, number(lng, "lng")?))
        }
        _ => Err(RecordError::MalformedField { field: "position" }),
    }
}

fn number(v: &Value, field: &'static str) -> Result<f64, RecordError> {
    match v {
        Value::Number(n) => n.as_f64().ok_or(RecordError::MalformedField { field }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| RecordError::MalformedField { field }),
        _ => Err(RecordError::MalformedField { field }),
    }
}

/// Non-empty trimmed string, or `None`.
fn text(v: &Value) -> Option<String> {
    let s = v.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}
