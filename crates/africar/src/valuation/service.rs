use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use super::catalog::FormCatalog;
use super::dataset::ReferenceDataset;
use super::domain::{VehicleForm, VehicleRecord};
use super::pipeline::{PipelineError, PricingPipeline};
use super::report::views::{AnalyticsCharts, ValuationReport};
use super::report::Reporter;
use super::validator::{validate, ValidationError, ValidationPolicy};

/// Immutable valuation context built once at startup and shared by every request.
pub struct ValuationService<P> {
    pipeline: Arc<P>,
    dataset: Arc<ReferenceDataset>,
    policy: ValidationPolicy,
}

impl<P> ValuationService<P>
where
    P: PricingPipeline + 'static,
{
    pub fn new(pipeline: Arc<P>, dataset: Arc<ReferenceDataset>, policy: ValidationPolicy) -> Self {
        Self {
            pipeline,
            dataset,
            policy,
        }
    }

    /// Validate the form, price it, and assemble the estimate with all four charts.
    ///
    /// The pipeline is only consulted once the form has produced a complete record.
    pub fn estimate(
        &self,
        form: &VehicleForm,
        today: NaiveDate,
    ) -> Result<ValuationReport, ValuationError> {
        let record = validate(form, self.policy).map_err(|err| {
            debug!(error = %err, missing = ?err.missing_fields(), "valuation form rejected");
            err
        })?;

        let predicted_price = self.pipeline.predict(&record).map_err(|err| {
            warn!(brand = %record.brand, make_year = record.make_year, error = %err, "pricing pipeline failed");
            err
        })?;

        if !predicted_price.is_finite() {
            warn!(
                brand = %record.brand,
                make_year = record.make_year,
                price = predicted_price,
                "pricing pipeline returned a non-finite price"
            );
            return Err(PipelineError::NonFinite(predicted_price).into());
        }

        info!(
            brand = %record.brand,
            make_year = record.make_year,
            price = predicted_price,
            "valuation estimate produced"
        );

        Ok(Reporter::new(&self.dataset).report(&record, predicted_price, today.year()))
    }

    pub fn analytics(&self, record: Option<&VehicleRecord>, today: NaiveDate) -> AnalyticsCharts {
        Reporter::new(&self.dataset).analytics(record, today.year())
    }

    pub fn catalog(&self) -> FormCatalog {
        FormCatalog::standard()
    }

    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }
}

/// Error returned from an estimate request; both variants are recoverable by the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Error in prediction: {0}")]
    Pipeline(#[from] PipelineError),
}

impl ValuationError {
    pub fn headline(&self) -> &'static str {
        match self {
            ValuationError::Validation(ValidationError::Incomplete { .. }) => {
                "Please fill all fields"
            }
            ValuationError::Validation(_) => "Invalid vehicle details",
            ValuationError::Pipeline(_) => "Error in prediction",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ValuationError::Validation(ValidationError::Incomplete { missing }) => {
                let names: Vec<&str> = missing.iter().map(|field| field.label()).collect();
                format!("Missing: {}", names.join(", "))
            }
            ValuationError::Validation(err) => err.to_string(),
            ValuationError::Pipeline(err) => {
                format!("Please check your inputs and try again. Error:{err}")
            }
        }
    }
}
