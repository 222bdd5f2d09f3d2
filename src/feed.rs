//! Wire types for the NeoWs `/feed` response.
//!
//! Only the fields the tracker reads are modelled; everything else in the
//! body is ignored. Date groups keep the order they have in the document,
//! which decides tie-breaks further down the pipeline.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Parsed body of a feed request.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResponse {
    /// Object count reported by the feed for the whole window.
    #[serde(default)]
    pub element_count: u64,
    pub near_earth_objects: DateGroups,
}

/// Date-keyed groups of raw records, in document order.
#[derive(Debug, Clone, Default)]
pub struct DateGroups(Vec<(String, Vec<RawNeo>)>);

impl DateGroups {
    /// Records across all groups, group by group.
    pub fn records(&self) -> impl Iterator<Item = &RawNeo> {
        self.0.iter().flat_map(|(_, objects)| objects.iter())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for DateGroups {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = DateGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of dates to lists of near-earth objects")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((date, objects)) = map.next_entry::<String, Vec<RawNeo>>()? {
                    groups.push((date, objects));
                }
                Ok(DateGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// One near-earth object as listed under a date.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNeo {
    pub name: String,
    pub is_potentially_hazardous_asteroid: bool,
    pub estimated_diameter: EstimatedDiameter,
    /// Missing and `null` both mean "no approach data".
    pub close_approach_data: Option<Vec<CloseApproach>>,
}

impl RawNeo {
    /// The first listed close approach; later ones are not used.
    pub fn first_approach(&self) -> Option<&CloseApproach> {
        self.close_approach_data.as_deref().and_then(|approaches| approaches.first())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: DiameterRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiameterRange {
    #[serde(deserialize_with = "deserialize_measurement")]
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseApproach {
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
    /// e.g. `"2024-Jan-05 12:34"`.
    pub close_approach_date_full: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelativeVelocity {
    #[serde(deserialize_with = "deserialize_measurement")]
    pub kilometers_per_hour: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MissDistance {
    #[serde(deserialize_with = "deserialize_measurement")]
    pub kilometers: f64,
}

/// A size, speed or distance: finite and non-negative. NeoWs sends most of
/// these as decimal strings; plain numbers are accepted too.
fn deserialize_measurement<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrNumber {
        Number(f64),
        Str(String),
    }

    let value = match StrOrNumber::deserialize(deserializer)? {
        StrOrNumber::Number(v) => v,
        StrOrNumber::Str(s) => s.trim().parse::<f64>().map_err(de::Error::custom)?,
    };

    if !value.is_finite() || value < 0.0 {
        return Err(de::Error::custom(format!(
            "expected a finite non-negative measurement, got {value}"
        )));
    }
    Ok(value)
}
