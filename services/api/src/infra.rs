use crate::cli::SourceArgs;
use africar::config::{AppConfig, ValuationConfig};
use africar::error::AppError;
use africar::valuation::{ArtifactPipeline, ReferenceDataset, ValidationPolicy, ValuationService};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads configuration and applies the command-line source overrides on top.
pub(crate) fn load_config(source: &SourceArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    apply_source_overrides(&mut config.valuation, source);
    Ok(config)
}

fn apply_source_overrides(valuation: &mut ValuationConfig, source: &SourceArgs) {
    if let Some(dataset) = &source.dataset {
        valuation.dataset_path = dataset.clone();
    }
    if let Some(model) = &source.model {
        valuation.model_path = model.clone();
    }
    if source.strict {
        valuation.policy = ValidationPolicy::Strict;
    }
}

/// Builds the shared valuation context.
///
/// A dataset named explicitly on the command line must load; the configured default
/// degrades to an empty table. The pricing pipeline is always required.
pub(crate) fn load_service(
    valuation: &ValuationConfig,
    source: &SourceArgs,
) -> Result<ValuationService<ArtifactPipeline>, AppError> {
    let dataset = if source.dataset.is_some() {
        ReferenceDataset::from_path(&valuation.dataset_path)?
    } else {
        ReferenceDataset::load_or_empty(&valuation.dataset_path)
    };

    let pipeline = ArtifactPipeline::from_path(&valuation.model_path)?;
    info!(
        model = %valuation.model_path.display(),
        pipeline = pipeline.name(),
        policy = ?valuation.policy,
        "pricing pipeline loaded"
    );

    Ok(ValuationService::new(
        Arc::new(pipeline),
        Arc::new(dataset),
        valuation.policy,
    ))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
