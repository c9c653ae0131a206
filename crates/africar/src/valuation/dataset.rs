use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read reference dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference dataset CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// One historical listing. Columns beyond these five are ignored on load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingRow {
    pub brand: String,
    pub make_year: i32,
    pub mileage_kmpl: f64,
    pub engine_cc: f64,
    pub price_usd: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ColumnStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

/// Static table of historical listings, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    rows: Vec<ListingRow>,
}

impl ReferenceDataset {
    pub fn new(rows: Vec<ListingRow>) -> Self {
        Self { rows }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();

        for record in csv_reader.deserialize::<ListingRow>() {
            rows.push(record?);
        }

        Ok(Self { rows })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Loads the dataset, degrading to an empty table when the source is unusable.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(dataset) => {
                info!(path = %path.display(), rows = dataset.len(), "reference dataset loaded");
                dataset
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "reference dataset unavailable; analytics will use fallbacks"
                );
                Self::default()
            }
        }
    }

    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn year_stats(&self) -> Option<ColumnStats> {
        ColumnStats::from_values(self.rows.iter().map(|row| f64::from(row.make_year)))
    }

    pub fn mileage_stats(&self) -> Option<ColumnStats> {
        ColumnStats::from_values(self.rows.iter().map(|row| row.mileage_kmpl))
    }

    pub fn engine_stats(&self) -> Option<ColumnStats> {
        ColumnStats::from_values(self.rows.iter().map(|row| row.engine_cc))
    }

    /// Listing count per brand, keyed in label order.
    pub fn brand_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.brand.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Percentage of listings for `brand`, or `None` when the brand never appears.
    pub fn brand_share(&self, brand: &str) -> Option<f64> {
        let listings = self.rows.iter().filter(|row| row.brand == brand).count();
        if listings == 0 {
            return None;
        }
        Some(listings as f64 / self.rows.len() as f64 * 100.0)
    }
}
