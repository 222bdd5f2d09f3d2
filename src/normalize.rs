//! Maps raw feed records to display-ready objects.

use serde::Serialize;
use tracing::debug;

use crate::feed::{RawNeo, RawResponse};
use crate::stats::AggregateSummary;

/// Placeholder for a missing approach date or an absent largest/fastest object.
pub const NOT_AVAILABLE: &str = "N/A";

/// One object as presented to the user, taken from its first close approach.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearEarthObject {
    pub name: String,
    pub estimated_diameter_m: f64,
    pub is_hazardous: bool,
    pub relative_velocity_kph: f64,
    pub miss_distance_km: f64,
    pub approach_date: String,
}

impl NearEarthObject {
    /// Returns `None` for records with no close-approach entry. Those are
    /// dropped outright rather than shown with zeroed fields.
    pub fn from_raw(raw: &RawNeo) -> Option<Self> {
        let approach = raw.first_approach()?;

        let approach_date = approach
            .close_approach_date_full
            .as_deref()
            .and_then(|full| full.split_whitespace().next())
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        Some(NearEarthObject {
            name: raw.name.clone(),
            estimated_diameter_m: raw.estimated_diameter.meters.estimated_diameter_max,
            is_hazardous: raw.is_potentially_hazardous_asteroid,
            relative_velocity_kph: approach.relative_velocity.kilometers_per_hour,
            miss_distance_km: approach.miss_distance.kilometers,
            approach_date,
        })
    }
}

/// Walks every date group in document order and returns the surviving
/// objects together with their summary.
///
/// With `hazardous_only`, non-hazardous records are skipped before anything
/// else looks at them, so they count toward nothing except `total_count`,
/// which is always the feed's own figure.
pub fn normalize(
    response: &RawResponse,
    hazardous_only: bool,
) -> (Vec<NearEarthObject>, AggregateSummary) {
    let objects: Vec<NearEarthObject> = response
        .near_earth_objects
        .records()
        .filter(|raw| !hazardous_only || raw.is_potentially_hazardous_asteroid)
        .filter_map(NearEarthObject::from_raw)
        .collect();

    let summary = AggregateSummary::from_objects(response.element_count, &objects);

    debug!(
        groups = response.near_earth_objects.len(),
        objects = objects.len(),
        hazardous = summary.hazardous_count,
        hazardous_only,
        "Feed normalized"
    );

    (objects, summary)
}
