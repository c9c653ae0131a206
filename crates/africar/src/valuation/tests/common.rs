use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::valuation::catalog::default_form;
use crate::valuation::dataset::{ListingRow, ReferenceDataset};
use crate::valuation::domain::{VehicleForm, VehicleRecord};
use crate::valuation::pipeline::{PipelineError, PricingPipeline};
use crate::valuation::validator::ValidationPolicy;
use crate::valuation::ValuationService;

/// Pipeline returning a fixed price and counting how often it was consulted.
#[derive(Default)]
pub(super) struct FixedPipeline {
    pub(super) price: f64,
    pub(super) calls: AtomicUsize,
}

impl FixedPipeline {
    pub(super) fn new(price: f64) -> Self {
        Self {
            price,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PricingPipeline for FixedPipeline {
    fn predict(&self, _record: &VehicleRecord) -> Result<f64, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.price)
    }
}

/// Pipeline that rejects every record the way an encoder rejects unseen levels.
pub(super) struct RejectingPipeline;

impl PricingPipeline for RejectingPipeline {
    fn predict(&self, record: &VehicleRecord) -> Result<f64, PipelineError> {
        Err(PipelineError::UnknownCategory {
            feature: "brand".to_string(),
            level: record.brand.clone(),
        })
    }
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub(super) fn listing(brand: &str, make_year: i32, price_usd: f64) -> ListingRow {
    ListingRow {
        brand: brand.to_string(),
        make_year,
        mileage_kmpl: 12.0 + f64::from(make_year - 2015),
        engine_cc: 1200.0 + f64::from(make_year - 2015) * 100.0,
        price_usd,
    }
}

pub(super) fn dataset() -> ReferenceDataset {
    ReferenceDataset::new(vec![
        listing("Chevrolet", 2016, 6500.0),
        listing("Toyota", 2019, 12500.0),
        listing("BMW", 2021, 28000.0),
        listing("Chevrolet", 2019, 9500.0),
        listing("Toyota", 2016, 7500.0),
    ])
}

pub(super) fn chevrolet_form() -> VehicleForm {
    default_form()
}

pub(super) fn build_service<P: PricingPipeline + 'static>(
    pipeline: P,
) -> (Arc<ValuationService<P>>, Arc<P>) {
    let pipeline = Arc::new(pipeline);
    let service = Arc::new(ValuationService::new(
        pipeline.clone(),
        Arc::new(dataset()),
        ValidationPolicy::Permissive,
    ));
    (service, pipeline)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
