use super::super::domain::VehicleRecord;
use super::views::{EstimateDisplay, PriceEstimate, PriceRange};

/// Fixed band around the point prediction; a display heuristic, not a confidence interval.
pub const RANGE_LOW_FACTOR: f64 = 0.85;
pub const RANGE_HIGH_FACTOR: f64 = 1.15;

pub fn price_range(point: f64) -> PriceRange {
    PriceRange {
        low: point * RANGE_LOW_FACTOR,
        high: point * RANGE_HIGH_FACTOR,
    }
}

pub(crate) fn build_estimate(
    record: &VehicleRecord,
    predicted_price: f64,
    current_year: i32,
) -> PriceEstimate {
    let range = price_range(predicted_price);
    let age_years = record.age_in_years(current_year);
    let condition_score = record.condition_score();

    let display = EstimateDisplay {
        price: format_usd(predicted_price),
        range: format!("{} - {}", format_usd(range.low), format_usd(range.high)),
        age: format!("{age_years} years old"),
        condition: format!("{condition_score}/10"),
        key_factors: key_factors(record, age_years),
    };

    PriceEstimate {
        point: predicted_price,
        range,
        age_years,
        condition_score,
        display,
    }
}

fn key_factors(record: &VehicleRecord, age_years: i32) -> Vec<String> {
    let insurance = if record.has_valid_insurance() {
        "Valid"
    } else {
        "Expired"
    };

    vec![
        format!("Vehicle age: {age_years} years"),
        format!(
            "Ownership history: {} previous owner(s)",
            record.owner_count
        ),
        format!(
            "Accident history: {} reported incident(s)",
            record.accidents_reported
        ),
        format!("Insurance status: {insurance}"),
    ]
}

/// Whole-dollar amount with thousands separators, e.g. `$13,800`.
pub fn format_usd(amount: f64) -> String {
    let rounded = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (index, digit) in rounded.chars().enumerate() {
        if index > 0 && (rounded.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount < 0.0 && rounded != "0" {
        format!("$-{grouped}")
    } else {
        format!("${grouped}")
    }
}
