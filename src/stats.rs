//! Aggregate statistics and the size histogram, computed from normalized objects.

use serde::Serialize;

use crate::normalize::NearEarthObject;

/// Bin count used for the size distribution.
pub const DEFAULT_BINS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateSummary {
    /// Count reported by the feed, independent of any client-side filter.
    pub total_count: u64,
    pub hazardous_count: usize,
    pub largest: Option<NearEarthObject>,
    pub fastest: Option<NearEarthObject>,
}

impl AggregateSummary {
    pub fn from_objects(total_count: u64, objects: &[NearEarthObject]) -> Self {
        AggregateSummary {
            total_count,
            hazardous_count: objects.iter().filter(|o| o.is_hazardous).count(),
            largest: first_max_by(objects, |o| o.estimated_diameter_m).cloned(),
            fastest: first_max_by(objects, |o| o.relative_velocity_kph).cloned(),
        }
    }

    pub fn pct_hazardous(&self, displayed: usize) -> f64 {
        Self::pct(self.hazardous_count, displayed)
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }
}

/// Maximum by `key`, keeping the earliest element when several share it.
fn first_max_by<F>(objects: &[NearEarthObject], key: F) -> Option<&NearEarthObject>
where
    F: Fn(&NearEarthObject) -> f64,
{
    objects.iter().fold(None, |best, obj| match best {
        Some(current) if key(obj) > key(current) => Some(obj),
        Some(current) => Some(current),
        None => Some(obj),
    })
}

/// Equal-width histogram over a set of values.
///
/// `edges` has one more entry than `counts`. Every bin is half-open except
/// the last, which also takes the maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Returns `None` when there is nothing finite to bin or `bins` is zero.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return None;
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Histogram { edges, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(low edge, high edge, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}
