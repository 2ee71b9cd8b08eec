//! In-memory view of the historical dataset, grouped per entity.

use serde::Serialize;
use std::collections::BTreeMap;

/// One historical data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub entity: String,
    pub period: i64,
    pub value: f64,
}

impl Observation {
    pub fn new(entity: impl Into<String>, period: i64, value: f64) -> Self {
        Self {
            entity: entity.into(),
            period,
            value,
        }
    }

    /// The `(period, value)` pair handed to chart consumers.
    pub fn pair(&self) -> (i64, f64) {
        (self.period, self.value)
    }
}

/// Observations grouped by entity, each series sorted by period.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    series: BTreeMap<String, Vec<Observation>>,
    fingerprint: String,
}

impl Dataset {
    pub fn new(observations: impl IntoIterator<Item = Observation>, fingerprint: String) -> Self {
        let mut series: BTreeMap<String, Vec<Observation>> = BTreeMap::new();
        for obs in observations {
            series.entry(obs.entity.clone()).or_default().push(obs);
        }
        for observations in series.values_mut() {
            // Stable, so duplicate periods keep file order
            observations.sort_by_key(|obs| obs.period);
        }

        Self {
            series,
            fingerprint,
        }
    }

    /// Entity keys in ascending order.
    pub fn entities(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    pub fn observations(&self, entity: &str) -> Option<&[Observation]> {
        self.series.get(entity).map(Vec::as_slice)
    }

    /// Digest of the source file this dataset was read from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Total number of observations across all entities.
    pub fn observation_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_and_sorts_by_period() {
        let dataset = Dataset::new(
            vec![
                Observation::new("India", 2017, 3.0),
                Observation::new("Japan", 2015, 9.0),
                Observation::new("India", 2015, 1.0),
                Observation::new("India", 2016, 2.0),
            ],
            "abc".to_string(),
        );

        assert_eq!(dataset.entities(), vec!["India", "Japan"]);
        assert_eq!(dataset.observation_count(), 4);
        assert_eq!(dataset.fingerprint(), "abc");

        let periods: Vec<i64> = dataset
            .observations("India")
            .unwrap()
            .iter()
            .map(|o| o.period)
            .collect();
        assert_eq!(periods, vec![2015, 2016, 2017]);
        assert!(dataset.observations("Peru").is_none());
    }
}
