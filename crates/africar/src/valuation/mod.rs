//! Used-car valuation: form validation, pricing pipeline boundary, and market analytics.

pub mod catalog;
pub mod dataset;
pub mod domain;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod router;
pub mod service;
pub mod validator;

#[cfg(test)]
mod tests;

pub use catalog::FormCatalog;
pub use dataset::{ColumnStats, DatasetError, ListingRow, ReferenceDataset};
pub use domain::{Feature, FormField, VehicleForm, VehicleRecord};
pub use normalizer::{brand_popularity, normalize};
pub use pipeline::{ArtifactPipeline, ModelLoadError, PipelineError, PricingPipeline};
pub use report::views::{
    AnalyticsCharts, BrandAverageChart, BrandPopularityChart, DepreciationChart, PriceEstimate,
    RadarChart, ValuationReport,
};
pub use report::Reporter;
pub use router::valuation_router;
pub use service::{ValuationError, ValuationService};
pub use validator::{validate, ValidationError, ValidationPolicy};
