use super::catalog;
use super::dataset::ReferenceDataset;

/// Score returned when the reference range has zero width.
pub const DEGENERATE_RANGE_SCORE: f64 = 50.0;

/// Share assumed for brands the dataset has never listed.
pub const DEFAULT_BRAND_SHARE: f64 = 10.0;

/// Rescales `value` onto 0-100 relative to `[min, max]`, clamping at both ends.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let width = max - min;
    if !width.is_finite() || width.abs() <= f64::EPSILON {
        return DEGENERATE_RANGE_SCORE;
    }

    let score = (value - min) / width * 100.0;
    if score.is_nan() {
        return DEGENERATE_RANGE_SCORE;
    }
    score.clamp(0.0, 100.0)
}

/// Percentage of dataset listings carrying `brand`.
///
/// Brands outside the catalog, or absent from the dataset, fall back to
/// [`DEFAULT_BRAND_SHARE`].
pub fn brand_popularity(dataset: &ReferenceDataset, brand: &str) -> f64 {
    if !catalog::is_known_brand(brand) {
        return DEFAULT_BRAND_SHARE;
    }
    dataset.brand_share(brand).unwrap_or(DEFAULT_BRAND_SHARE)
}
