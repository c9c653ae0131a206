mod charts;
mod estimate;
pub mod views;

pub use charts::RADAR_AXES;
pub use estimate::{format_usd, price_range, RANGE_HIGH_FACTOR, RANGE_LOW_FACTOR};

use super::dataset::ReferenceDataset;
use super::domain::VehicleRecord;
use views::{AnalyticsCharts, ValuationReport};

/// Derives display metrics and chart datasets from a prediction and the reference table.
#[derive(Debug, Clone, Copy)]
pub struct Reporter<'a> {
    dataset: &'a ReferenceDataset,
}

impl<'a> Reporter<'a> {
    pub fn new(dataset: &'a ReferenceDataset) -> Self {
        Self { dataset }
    }

    pub fn report(
        &self,
        record: &VehicleRecord,
        predicted_price: f64,
        current_year: i32,
    ) -> ValuationReport {
        ValuationReport {
            estimate: estimate::build_estimate(record, predicted_price, current_year),
            charts: self.analytics(Some(record), current_year),
        }
    }

    /// Chart datasets; the radar stays a placeholder until a record is supplied.
    pub fn analytics(&self, record: Option<&VehicleRecord>, current_year: i32) -> AnalyticsCharts {
        AnalyticsCharts {
            brand_average: charts::brand_average(self.dataset),
            brand_popularity: charts::brand_popularity_chart(self.dataset),
            depreciation: charts::depreciation(self.dataset, current_year),
            radar: charts::radar(self.dataset, record),
        }
    }
}
