use crate::stats::LogLinearModel;
use serde::{Deserialize, Serialize};

/// A regression fitted for one entity, as stored in the model cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub entity: String,
    pub last_period: i64,
    /// Fingerprint of the dataset the model was trained on.
    pub fingerprint: String,
    pub regression: LogLinearModel,
}

impl FittedModel {
    /// Whether the model may serve `entity` for a dataset with `fingerprint`.
    pub fn is_valid_for(&self, entity: &str, fingerprint: &str) -> bool {
        self.entity == entity && self.fingerprint == fingerprint
    }

    /// The next `horizon` periods after the last observed one, or `None` if the
    /// last of them does not fit in an `i64`.
    pub fn project(&self, horizon: usize) -> Option<Vec<(i64, f64)>> {
        let steps = i64::try_from(horizon).ok()?;
        self.last_period.checked_add(steps)?;

        Some(
            (1..=steps)
                .map(|step| {
                    let period = self.last_period + step;
                    (period, self.regression.predict(period))
                })
                .collect(),
        )
    }
}
