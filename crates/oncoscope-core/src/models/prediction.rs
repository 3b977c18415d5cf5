use serde::{Deserialize, Serialize};

/// Outcome of one successful prediction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Diagnosis label, e.g. `"Maligno"` or `"Benigno"`.
    pub diagnosis: String,
    /// Confidence in the diagnosis, in `[0, 1]`.
    pub confidence: f64,
}

impl Prediction {
    pub fn new(diagnosis: impl Into<String>, confidence: f64) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            confidence,
        }
    }

    pub fn has_valid_confidence(&self) -> bool {
        self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)
    }

    pub fn is_malignant(&self) -> bool {
        self.diagnosis.trim().eq_ignore_ascii_case("maligno")
    }
}
