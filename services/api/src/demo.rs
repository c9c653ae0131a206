use crate::cli::SourceArgs;
use crate::infra::{load_config, load_service};
use africar::error::AppError;
use africar::valuation::catalog::default_form;
use africar::valuation::report::views::{RadarChart, SeriesSource};
use africar::valuation::report::format_usd;
use africar::valuation::{AnalyticsCharts, FormField, PriceEstimate, VehicleForm};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

#[derive(Args, Debug, Default)]
pub(crate) struct EstimateArgs {
    #[arg(long)]
    pub(crate) make_year: Option<String>,
    /// Fuel efficiency in km per litre
    #[arg(long)]
    pub(crate) mileage_kmpl: Option<String>,
    #[arg(long)]
    pub(crate) engine_cc: Option<String>,
    /// Number of previous owners
    #[arg(long)]
    pub(crate) owner_count: Option<String>,
    #[arg(long)]
    pub(crate) accidents_reported: Option<String>,
    #[arg(long)]
    pub(crate) fuel_type: Option<String>,
    #[arg(long)]
    pub(crate) brand: Option<String>,
    #[arg(long)]
    pub(crate) transmission: Option<String>,
    #[arg(long)]
    pub(crate) color: Option<String>,
    #[arg(long)]
    pub(crate) service_history: Option<String>,
    #[arg(long)]
    pub(crate) insurance_valid: Option<String>,
    /// Fill omitted fields with the form defaults instead of leaving them blank
    #[arg(long)]
    pub(crate) prefill: bool,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

impl EstimateArgs {
    fn form(&self) -> VehicleForm {
        let mut form = if self.prefill {
            default_form()
        } else {
            VehicleForm::default()
        };

        let supplied = [
            (FormField::MakeYear, &self.make_year),
            (FormField::MileageKmpl, &self.mileage_kmpl),
            (FormField::EngineCc, &self.engine_cc),
            (FormField::OwnerCount, &self.owner_count),
            (FormField::AccidentsReported, &self.accidents_reported),
            (FormField::FuelType, &self.fuel_type),
            (FormField::Brand, &self.brand),
            (FormField::Transmission, &self.transmission),
            (FormField::Color, &self.color),
            (FormField::ServiceHistory, &self.service_history),
            (FormField::InsuranceValid, &self.insurance_valid),
        ];
        for (field, value) in supplied {
            if let Some(raw) = value {
                form.set(field, Some(Value::String(raw.clone())));
            }
        }
        form
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct AnalyticsArgs {
    /// Evaluation date (YYYY-MM-DD) used for vehicle ages. Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the charts as JSON
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = load_config(&args.source)?;
    let service = load_service(&config.valuation, &args.source)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    match service.estimate(&args.form(), today) {
        Ok(report) if args.json => print_json(&report),
        Ok(report) => {
            println!("{}", estimate_panel(&report.estimate));
            println!("{}", chart_listing(&report.charts));
        }
        Err(err) => {
            println!("{}", err.headline());
            println!("  {}", err.detail());
        }
    }

    Ok(())
}

pub(crate) fn run_analytics(args: AnalyticsArgs) -> Result<(), AppError> {
    let config = load_config(&args.source)?;
    let service = load_service(&config.valuation, &args.source)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let charts = service.analytics(None, today);
    if args.json {
        print_json(&charts);
    } else {
        println!(
            "Market analytics ({} reference listings)",
            service.dataset().len()
        );
        println!("{}", chart_listing(&charts));
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("JSON output unavailable: {err}"),
    }
}

pub(crate) fn estimate_panel(estimate: &PriceEstimate) -> String {
    let display = &estimate.display;
    let mut lines = vec![
        format!("Estimated price: {}", display.price),
        format!("Price range: {}", display.range),
        format!("Vehicle age: {}", display.age),
        format!("Condition score: {}", display.condition),
        "Key factors:".to_string(),
    ];
    lines.extend(display.key_factors.iter().map(|factor| format!("  - {factor}")));
    lines.join("\n")
}

pub(crate) fn chart_listing(charts: &AnalyticsCharts) -> String {
    let mut lines = vec![format!("\n{}", charts.brand_average.title)];
    if charts.brand_average.entries.is_empty() {
        lines.push("  no listings".to_string());
    }
    for entry in &charts.brand_average.entries {
        lines.push(format!(
            "  {:<12} {}",
            entry.brand,
            format_usd(entry.average_price)
        ));
    }

    lines.push(format!("\n{}", charts.brand_popularity.title));
    if charts.brand_popularity.entries.is_empty() {
        lines.push("  no listings".to_string());
    }
    for entry in &charts.brand_popularity.entries {
        lines.push(format!(
            "  {:<12} {:>4} listings ({:.1}%)",
            entry.brand, entry.listings, entry.share_pct
        ));
    }

    let depreciation = &charts.depreciation;
    let source = match depreciation.source {
        SeriesSource::Dataset => "reference listings",
        SeriesSource::Fallback => "typical curve",
    };
    lines.push(format!("\n{} [{source}]", depreciation.title));
    for point in &depreciation.points {
        lines.push(format!(
            "  {} ({:>2} yrs) {:>5.1}%",
            point.year, point.age_years, point.retention_pct
        ));
    }

    match &charts.radar {
        RadarChart::Placeholder { title } => lines.push(format!("\n{title}")),
        RadarChart::Comparison {
            title,
            axes,
            vehicle,
            market,
        } => {
            lines.push(format!("\n{title}"));
            lines.push(format!(
                "  {:<20} {:>12} {:>14}",
                "", vehicle.name, market.name
            ));
            for (index, axis) in axes.iter().enumerate() {
                lines.push(format!(
                    "  {:<20} {:>12.1} {:>14.1}",
                    axis, vehicle.scores[index], market.scores[index]
                ));
            }
        }
    }

    lines.join("\n")
}
