use super::super::catalog;
use super::super::dataset::ReferenceDataset;
use super::super::domain::VehicleRecord;
use super::super::normalizer::{brand_popularity, normalize};
use super::views::{
    BrandAverageChart, BrandAverageEntry, BrandPopularityChart, BrandShareEntry,
    DepreciationChart, RadarChart, RadarSeries, RetentionPoint, SeriesSource,
};
use std::collections::BTreeMap;

pub const RADAR_AXES: [&str; 4] = [
    "Age Factor",
    "Mileage Efficiency",
    "Engine Power",
    "Brand Popularity",
];

/// Market brand axis is fixed at the midpoint rather than derived from the data.
const MARKET_BRAND_SCORE: f64 = 50.0;

const FALLBACK_FIRST_YEAR: i32 = 2015;
const FALLBACK_RETENTION: [f64; 10] = [27.0, 30.0, 34.0, 39.0, 45.0, 52.0, 61.0, 72.0, 85.0, 100.0];

const AWAITING_INPUT_TITLE: &str = "Vehicle Analysis (Enter details and predict to see analysis)";
const NO_MARKET_DATA_TITLE: &str = "Vehicle Analysis (market data unavailable)";

/// Mean price per brand, most expensive first; equal means keep label order.
pub fn brand_average(dataset: &ReferenceDataset) -> BrandAverageChart {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in dataset.rows() {
        let entry = totals.entry(row.brand.as_str()).or_insert((0.0, 0));
        entry.0 += row.price_usd;
        entry.1 += 1;
    }

    let mut entries: Vec<BrandAverageEntry> = totals
        .into_iter()
        .map(|(brand, (sum, count))| BrandAverageEntry {
            brand: brand.to_string(),
            average_price: sum / count as f64,
        })
        .collect();
    entries.sort_by(|a, b| b.average_price.total_cmp(&a.average_price));

    BrandAverageChart {
        title: "Average Price by Brand",
        entries,
    }
}

/// Listing count and share of total per brand; brands without listings do not appear.
pub fn brand_popularity_chart(dataset: &ReferenceDataset) -> BrandPopularityChart {
    let total = dataset.len();
    let mut entries: Vec<BrandShareEntry> = dataset
        .brand_counts()
        .into_iter()
        .map(|(brand, listings)| BrandShareEntry {
            brand: brand.to_string(),
            listings,
            share_pct: listings as f64 / total as f64 * 100.0,
        })
        .collect();
    entries.sort_by(|a, b| b.listings.cmp(&a.listings));

    BrandPopularityChart {
        title: "Brand Market Share (by listing count)",
        entries,
    }
}

/// Mean price per make year as a percentage of the best-priced year, oldest first.
///
/// An empty dataset yields the fixed 2015-2024 curve instead.
pub fn depreciation(dataset: &ReferenceDataset, current_year: i32) -> DepreciationChart {
    let title = "Vehicle Value Retention by Year";

    let mut totals: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for row in dataset.rows() {
        let entry = totals.entry(row.make_year).or_insert((0.0, 0));
        entry.0 += row.price_usd;
        entry.1 += 1;
    }

    if totals.is_empty() {
        let points = FALLBACK_RETENTION
            .iter()
            .zip(FALLBACK_FIRST_YEAR..)
            .map(|(&retention_pct, year)| RetentionPoint {
                year,
                age_years: current_year.saturating_sub(year),
                average_price: None,
                retention_pct,
            })
            .collect();

        return DepreciationChart {
            title,
            source: SeriesSource::Fallback,
            points,
        };
    }

    let means: Vec<(i32, f64)> = totals
        .into_iter()
        .map(|(year, (sum, count))| (year, sum / count as f64))
        .collect();
    let best = means
        .iter()
        .map(|(_, mean)| *mean)
        .fold(f64::NEG_INFINITY, f64::max);

    let points = means
        .into_iter()
        .map(|(year, mean)| RetentionPoint {
            year,
            age_years: current_year.saturating_sub(year),
            average_price: Some(mean),
            retention_pct: if best > 0.0 { mean / best * 100.0 } else { 0.0 },
        })
        .collect();

    DepreciationChart {
        title,
        source: SeriesSource::Dataset,
        points,
    }
}

/// User-versus-market comparison over the four radar axes.
pub fn radar(dataset: &ReferenceDataset, record: Option<&VehicleRecord>) -> RadarChart {
    let Some(record) = record else {
        return RadarChart::Placeholder {
            title: AWAITING_INPUT_TITLE.to_string(),
        };
    };

    let (Some(years), Some(mileage), Some(engine)) = (
        dataset.year_stats(),
        dataset.mileage_stats(),
        dataset.engine_stats(),
    ) else {
        return RadarChart::Placeholder {
            title: NO_MARKET_DATA_TITLE.to_string(),
        };
    };

    let brand_label = if catalog::is_known_brand(&record.brand) {
        record.brand.as_str()
    } else {
        "Unknown"
    };

    let vehicle = RadarSeries {
        name: "Your Vehicle",
        scores: [
            normalize(f64::from(record.make_year), years.min, years.max),
            normalize(record.mileage_kmpl, 0.0, mileage.max),
            normalize(record.engine_cc as f64, engine.min, engine.max),
            brand_popularity(dataset, brand_label),
        ],
    };

    let market = RadarSeries {
        name: "Market Average",
        scores: [
            normalize(years.mean, years.min, years.max),
            normalize(mileage.mean, 0.0, mileage.max),
            normalize(engine.mean, engine.min, engine.max),
            MARKET_BRAND_SCORE,
        ],
    };

    RadarChart::Comparison {
        title: format!("Your {brand_label} vs Market Average"),
        axes: RADAR_AXES,
        vehicle,
        market,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::dataset::ListingRow;

    fn listing(brand: &str, make_year: i32, price_usd: f64) -> ListingRow {
        ListingRow {
            brand: brand.to_string(),
            make_year,
            mileage_kmpl: 15.0,
            engine_cc: 1500.0,
            price_usd,
        }
    }

    #[test]
    fn brand_average_sorts_descending() {
        let dataset = ReferenceDataset::new(vec![
            listing("A", 2018, 100.0),
            listing("B", 2018, 300.0),
            listing("A", 2019, 200.0),
        ]);
        let chart = brand_average(&dataset);
        let pairs: Vec<(&str, f64)> = chart
            .entries
            .iter()
            .map(|entry| (entry.brand.as_str(), entry.average_price))
            .collect();
        assert_eq!(pairs, vec![("B", 300.0), ("A", 150.0)]);
    }

    #[test]
    fn brand_average_ties_keep_label_order() {
        let dataset = ReferenceDataset::new(vec![
            listing("Kia", 2018, 500.0),
            listing("Ford", 2018, 500.0),
            listing("BMW", 2018, 500.0),
        ]);
        let brands: Vec<String> = brand_average(&dataset)
            .entries
            .into_iter()
            .map(|entry| entry.brand)
            .collect();
        assert_eq!(brands, vec!["BMW", "Ford", "Kia"]);
    }

    #[test]
    fn popularity_reports_shares_of_total() {
        let dataset = ReferenceDataset::new(vec![
            listing("Kia", 2018, 1.0),
            listing("Ford", 2018, 1.0),
            listing("Kia", 2018, 1.0),
            listing("Kia", 2018, 1.0),
        ]);
        let chart = brand_popularity_chart(&dataset);
        assert_eq!(chart.entries.len(), 2);
        assert_eq!(chart.entries[0].brand, "Kia");
        assert_eq!(chart.entries[0].listings, 3);
        assert_eq!(chart.entries[0].share_pct, 75.0);
        assert_eq!(chart.entries[1].share_pct, 25.0);
        assert!(brand_popularity_chart(&ReferenceDataset::default())
            .entries
            .is_empty());
    }

    #[test]
    fn depreciation_peaks_at_one_hundred() {
        let dataset = ReferenceDataset::new(vec![
            listing("Kia", 2016, 4000.0),
            listing("Kia", 2020, 9000.0),
            listing("Kia", 2018, 6000.0),
            listing("Kia", 2020, 11000.0),
        ]);
        let chart = depreciation(&dataset, 2025);
        assert_eq!(chart.source, SeriesSource::Dataset);

        let years: Vec<i32> = chart.points.iter().map(|point| point.year).collect();
        assert_eq!(years, vec![2016, 2018, 2020]);
        assert_eq!(chart.points[2].retention_pct, 100.0);
        assert_eq!(chart.points[2].average_price, Some(10000.0));
        assert_eq!(chart.points[0].retention_pct, 40.0);
        assert_eq!(chart.points[0].age_years, 9);

        let total: f64 = chart.points.iter().map(|point| point.retention_pct).sum();
        assert!(total <= chart.points.len() as f64 * 100.0);
    }

    #[test]
    fn extreme_listing_years_saturate_ages() {
        let dataset = ReferenceDataset::new(vec![
            listing("Kia", i32::MIN, 1000.0),
            listing("Kia", 2020, 2000.0),
        ]);
        let chart = depreciation(&dataset, 2025);
        assert_eq!(chart.points[0].year, i32::MIN);
        assert_eq!(chart.points[0].age_years, i32::MAX);
        assert_eq!(chart.points[0].retention_pct, 50.0);
    }

    #[test]
    fn empty_dataset_uses_fallback_curve() {
        let chart = depreciation(&ReferenceDataset::default(), 2025);
        assert_eq!(chart.source, SeriesSource::Fallback);
        assert_eq!(chart.points.len(), 10);
        assert_eq!(chart.points[0].year, 2015);
        assert_eq!(chart.points[0].retention_pct, 27.0);
        assert_eq!(chart.points[9].year, 2024);
        assert_eq!(chart.points[9].retention_pct, 100.0);
        assert!(chart.points.iter().all(|point| point.average_price.is_none()));
    }

    fn record(brand: &str) -> VehicleRecord {
        VehicleRecord {
            make_year: 2019,
            mileage_kmpl: 10.0,
            engine_cc: 2000,
            owner_count: 1,
            accidents_reported: 0,
            fuel_type: "Petrol".to_string(),
            brand: brand.to_string(),
            transmission: "Manual".to_string(),
            color: "White".to_string(),
            service_history: "Full".to_string(),
            insurance_valid: "Yes".to_string(),
        }
    }

    fn radar_dataset() -> ReferenceDataset {
        ReferenceDataset::new(vec![
            ListingRow {
                brand: "Kia".to_string(),
                make_year: 2015,
                mileage_kmpl: 20.0,
                engine_cc: 1000.0,
                price_usd: 5000.0,
            },
            ListingRow {
                brand: "Ford".to_string(),
                make_year: 2023,
                mileage_kmpl: 10.0,
                engine_cc: 3000.0,
                price_usd: 15000.0,
            },
        ])
    }

    #[test]
    fn radar_without_submission_is_placeholder() {
        let chart = radar(&radar_dataset(), None);
        assert!(chart.is_placeholder());
        assert_eq!(chart.title(), AWAITING_INPUT_TITLE);
    }

    #[test]
    fn radar_without_market_data_is_placeholder() {
        let chart = radar(&ReferenceDataset::default(), Some(&record("Kia")));
        assert!(chart.is_placeholder());
    }

    #[test]
    fn radar_scores_vehicle_against_market() {
        let chart = radar(&radar_dataset(), Some(&record("Kia")));
        let RadarChart::Comparison {
            title,
            axes,
            vehicle,
            market,
        } = chart
        else {
            panic!("expected comparison chart");
        };

        assert_eq!(title, "Your Kia vs Market Average");
        assert_eq!(axes, RADAR_AXES);
        assert_eq!(vehicle.scores, [50.0, 50.0, 50.0, 50.0]);
        assert_eq!(market.scores, [50.0, 75.0, 50.0, 50.0]);
    }

    #[test]
    fn radar_labels_unlisted_brands_unknown() {
        let chart = radar(&radar_dataset(), Some(&record("Lada")));
        let RadarChart::Comparison { title, vehicle, .. } = chart else {
            panic!("expected comparison chart");
        };
        assert_eq!(title, "Your Unknown vs Market Average");
        assert_eq!(vehicle.scores[3], 10.0);
    }
}
