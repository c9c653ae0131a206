use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

/// Pre-formatted strings for the estimate panel.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateDisplay {
    pub price: String,
    pub range: String,
    pub age: String,
    pub condition: String,
    pub key_factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceEstimate {
    pub point: f64,
    pub range: PriceRange,
    pub age_years: i32,
    pub condition_score: i64,
    pub display: EstimateDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandAverageEntry {
    pub brand: String,
    pub average_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandAverageChart {
    pub title: &'static str,
    pub entries: Vec<BrandAverageEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandShareEntry {
    pub brand: String,
    pub listings: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandPopularityChart {
    pub title: &'static str,
    pub entries: Vec<BrandShareEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesSource {
    Dataset,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetentionPoint {
    pub year: i32,
    pub age_years: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price: Option<f64>,
    pub retention_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepreciationChart {
    pub title: &'static str,
    pub source: SeriesSource,
    pub points: Vec<RetentionPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub name: &'static str,
    pub scores: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RadarChart {
    Placeholder {
        title: String,
    },
    Comparison {
        title: String,
        axes: [&'static str; 4],
        vehicle: RadarSeries,
        market: RadarSeries,
    },
}

impl RadarChart {
    pub fn title(&self) -> &str {
        match self {
            RadarChart::Placeholder { title } | RadarChart::Comparison { title, .. } => title,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RadarChart::Placeholder { .. })
    }
}

/// The four chart datasets handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsCharts {
    pub brand_average: BrandAverageChart,
    pub brand_popularity: BrandPopularityChart,
    pub depreciation: DepreciationChart,
    pub radar: RadarChart,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValuationReport {
    pub estimate: PriceEstimate,
    pub charts: AnalyticsCharts,
}
