use super::domain::{Feature, FormField, VehicleRecord};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Pre-trained pricing capability: a structured record in, a price in USD out.
pub trait PricingPipeline: Send + Sync {
    fn predict(&self, record: &VehicleRecord) -> Result<f64, PipelineError>;
}

/// Failure raised by a pipeline while scoring a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("Found unknown categories ['{level}'] in column '{feature}' during transform")]
    UnknownCategory { feature: String, level: String },
    #[error("columns are missing: {{'{0}'}}")]
    MissingFeature(String),
    #[error("prediction is not a finite number ({0})")]
    NonFinite(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("failed to read pricing artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("pricing artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("pricing artifact rejected: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
struct NumericTerm {
    coefficient: f64,
    #[serde(default)]
    center: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct PipelineArtifact {
    #[serde(default)]
    name: Option<String>,
    intercept: f64,
    #[serde(default)]
    numeric: BTreeMap<String, NumericTerm>,
    #[serde(default)]
    categorical: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    floor: Option<f64>,
}

/// Pipeline restored from a serialized additive pricing artifact.
///
/// Categorical columns behave like a strict one-hot encoder: a level the artifact was
/// not fitted on is an error rather than a zero contribution.
#[derive(Debug, Clone)]
pub struct ArtifactPipeline {
    artifact: PipelineArtifact,
}

impl ArtifactPipeline {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelLoadError> {
        let artifact: PipelineArtifact = serde_json::from_reader(reader)?;
        if artifact.numeric.is_empty() && artifact.categorical.is_empty() {
            return Err(ModelLoadError::Invalid(
                "artifact declares no features".to_string(),
            ));
        }
        if artifact.floor.is_some_and(|floor| floor < 0.0) {
            return Err(ModelLoadError::Invalid(
                "price floor must not be negative".to_string(),
            ));
        }
        Ok(Self { artifact })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn name(&self) -> &str {
        self.artifact.name.as_deref().unwrap_or("pricing pipeline")
    }

    fn categorical_term(&self, field: FormField, level: &str) -> Result<f64, PipelineError> {
        let table = self
            .artifact
            .categorical
            .get(field.key())
            .ok_or_else(|| PipelineError::MissingFeature(field.key().to_string()))?;

        table
            .get(level)
            .copied()
            .ok_or_else(|| PipelineError::UnknownCategory {
                feature: field.key().to_string(),
                level: level.to_string(),
            })
    }

    fn numeric_term(&self, field: FormField, value: f64) -> Result<f64, PipelineError> {
        let term = self
            .artifact
            .numeric
            .get(field.key())
            .ok_or_else(|| PipelineError::MissingFeature(field.key().to_string()))?;
        Ok(term.coefficient * (value - term.center))
    }
}

impl PricingPipeline for ArtifactPipeline {
    fn predict(&self, record: &VehicleRecord) -> Result<f64, PipelineError> {
        let mut price = self.artifact.intercept;

        for field in FormField::ordered() {
            price += match record.feature(field) {
                Feature::Categorical(level) => self.categorical_term(field, level)?,
                Feature::Numeric(value) => self.numeric_term(field, value)?,
            };
        }

        if !price.is_finite() {
            return Err(PipelineError::NonFinite(price));
        }

        Ok(match self.artifact.floor {
            Some(floor) => price.max(floor),
            None => price,
        })
    }
}
