//! Text and JSON renderings of a dataset for the command line.

use layers::symbology::Symbology;
use places::{Place, SkippedRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceRow {
    pub name: String,
    pub category: String,
    pub lat: f64,
    pub lng: f64,
    /// Marker color the map would use.
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub fn rows(places: &[&Place], symbology: &Symbology) -> Vec<PlaceRow> {
    places
        .iter()
        .map(|p| PlaceRow {
            name: p.name.clone(),
            category: p.category.clone(),
            lat: p.position.lat,
            lng: p.position.lng,
            color: symbology.style_for(&p.category).color.clone(),
            description: p.description.clone(),
        })
        .collect()
}

pub fn table(rows: &[PlaceRow]) -> String {
    let name_w = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max(4);
    let cat_w = rows
        .iter()
        .map(|r| r.category.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut out = format!("{:<name_w$}  {:<cat_w$}  POSITION\n", "NAME", "CATEGORY");
    for r in rows {
        out.push_str(&format!(
            "{:<name_w$}  {:<cat_w$}  {:.6},{:.6}\n",
            r.name, r.category, r.lat, r.lng
        ));
    }
    out.push_str(&format!("{} places\n", rows.len()));
    out
}

/// Outcome of `campus check`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub accepted: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "{} records accepted, {} skipped\n",
            self.accepted,
            self.skipped.len()
        );
        for s in &self.skipped {
            out.push_str(&format!("  record {}: {}\n", s.index, s.reason));
        }
        out
    }
}
