//! Win probability classifiers.
//!
//! Predictors build a [`FeatureVector`] and hand it to a
//! [`WinProbabilityModel`]. The bundled [`LogisticModel`] reads its
//! coefficients from JSON; any other classifier can be plugged in through
//! the trait.

use crate::error::{IplError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Named model inputs. Categorical values are one-hot encoded as
/// `"name=value"` keys by models that need numbers only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureVector {
    pub numeric: BTreeMap<String, f64>,
    pub categorical: BTreeMap<String, String>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: f64) -> &mut Self {
        self.numeric.insert(name.to_string(), value);
        self
    }

    pub fn set_category(&mut self, name: &str, value: &str) -> &mut Self {
        self.categorical.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> f64 {
        self.numeric.get(name).copied().unwrap_or(0.0)
    }

    /// Numeric features plus one-hot categorical keys.
    pub fn encoded(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.numeric.iter().map(|(k, v)| (k.clone(), *v)).chain(
            self.categorical
                .iter()
                .map(|(k, v)| (format!("{}={}", k, v), 1.0)),
        )
    }
}

/// A trained binary classifier returning `[p_lose, p_win]`.
pub trait WinProbabilityModel: Send + Sync {
    fn predict_probability(&self, features: &FeatureVector) -> Result<[f64; 2]>;
}

/// Mean and standard deviation used to standardise one input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaling {
    pub mean: f64,
    pub std: f64,
}

/// Logistic regression over the encoded feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub intercept: f64,
    pub weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub scaling: BTreeMap<String, Scaling>,
}

impl LogisticModel {
    pub fn new(intercept: f64, weights: BTreeMap<String, f64>) -> Self {
        Self {
            intercept,
            weights,
            scaling: BTreeMap::new(),
        }
    }

    /// Load coefficients from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| IplError::Model {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let model: Self = serde_json::from_str(&raw).map_err(|e| IplError::Model {
            message: format!("invalid model file {}: {}", path.display(), e),
        })?;
        debug!(path = %path.display(), weights = model.weights.len(), "loaded logistic model");
        Ok(model)
    }

    fn scaled(&self, name: &str, value: f64) -> f64 {
        match self.scaling.get(name) {
            Some(s) if s.std > 0.0 => (value - s.mean) / s.std,
            Some(s) => value - s.mean,
            None => value,
        }
    }
}

impl WinProbabilityModel for LogisticModel {
    fn predict_probability(&self, features: &FeatureVector) -> Result<[f64; 2]> {
        let z = features
            .encoded()
            .filter_map(|(name, value)| {
                self.weights
                    .get(&name)
                    .map(|w| w * self.scaled(&name, value))
            })
            .fold(self.intercept, |acc, term| acc + term);

        let p_win = 1.0 / (1.0 + (-z).exp());
        if !p_win.is_finite() {
            return Err(IplError::Model {
                message: "model produced a non-finite probability".to_string(),
            });
        }
        Ok([1.0 - p_win, p_win])
    }
}
