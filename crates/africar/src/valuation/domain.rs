use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The eleven inputs collected by the valuation form, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    MakeYear,
    MileageKmpl,
    EngineCc,
    OwnerCount,
    AccidentsReported,
    FuelType,
    Brand,
    Transmission,
    Color,
    ServiceHistory,
    InsuranceValid,
}

impl FormField {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::MakeYear,
            Self::MileageKmpl,
            Self::EngineCc,
            Self::OwnerCount,
            Self::AccidentsReported,
            Self::FuelType,
            Self::Brand,
            Self::Transmission,
            Self::Color,
            Self::ServiceHistory,
            Self::InsuranceValid,
        ]
    }

    /// Column name expected by the pricing pipeline.
    pub const fn key(self) -> &'static str {
        match self {
            Self::MakeYear => "make_year",
            Self::MileageKmpl => "mileage_kmpl",
            Self::EngineCc => "engine_cc",
            Self::OwnerCount => "owner_count",
            Self::AccidentsReported => "accidents_reported",
            Self::FuelType => "fuel_type",
            Self::Brand => "brand",
            Self::Transmission => "transmission",
            Self::Color => "color",
            Self::ServiceHistory => "service_history",
            Self::InsuranceValid => "insurance_valid",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MakeYear => "Make Year",
            Self::MileageKmpl => "Mileage (kmpl)",
            Self::EngineCc => "Engine CC",
            Self::OwnerCount => "Previous Owners",
            Self::AccidentsReported => "Accidents Reported",
            Self::FuelType => "Fuel Type",
            Self::Brand => "Brand",
            Self::Transmission => "Transmission",
            Self::Color => "Color",
            Self::ServiceHistory => "Service History",
            Self::InsuranceValid => "Insurance Valid",
        }
    }

    pub const fn is_categorical(self) -> bool {
        matches!(
            self,
            Self::FuelType
                | Self::Brand
                | Self::Transmission
                | Self::Color
                | Self::ServiceHistory
                | Self::InsuranceValid
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw form state exactly as entered; any field may be absent or of the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleForm {
    #[serde(default)]
    pub make_year: Option<Value>,
    #[serde(default)]
    pub mileage_kmpl: Option<Value>,
    #[serde(default)]
    pub engine_cc: Option<Value>,
    #[serde(default)]
    pub owner_count: Option<Value>,
    #[serde(default)]
    pub accidents_reported: Option<Value>,
    #[serde(default)]
    pub fuel_type: Option<Value>,
    #[serde(default)]
    pub brand: Option<Value>,
    #[serde(default)]
    pub transmission: Option<Value>,
    #[serde(default)]
    pub color: Option<Value>,
    #[serde(default)]
    pub service_history: Option<Value>,
    #[serde(default)]
    pub insurance_valid: Option<Value>,
}

impl VehicleForm {
    pub fn get(&self, field: FormField) -> Option<&Value> {
        let slot = match field {
            FormField::MakeYear => &self.make_year,
            FormField::MileageKmpl => &self.mileage_kmpl,
            FormField::EngineCc => &self.engine_cc,
            FormField::OwnerCount => &self.owner_count,
            FormField::AccidentsReported => &self.accidents_reported,
            FormField::FuelType => &self.fuel_type,
            FormField::Brand => &self.brand,
            FormField::Transmission => &self.transmission,
            FormField::Color => &self.color,
            FormField::ServiceHistory => &self.service_history,
            FormField::InsuranceValid => &self.insurance_valid,
        };
        slot.as_ref()
    }

    pub fn set(&mut self, field: FormField, value: Option<Value>) {
        let slot = match field {
            FormField::MakeYear => &mut self.make_year,
            FormField::MileageKmpl => &mut self.mileage_kmpl,
            FormField::EngineCc => &mut self.engine_cc,
            FormField::OwnerCount => &mut self.owner_count,
            FormField::AccidentsReported => &mut self.accidents_reported,
            FormField::FuelType => &mut self.fuel_type,
            FormField::Brand => &mut self.brand,
            FormField::Transmission => &mut self.transmission,
            FormField::Color => &mut self.color,
            FormField::ServiceHistory => &mut self.service_history,
            FormField::InsuranceValid => &mut self.insurance_valid,
        };
        *slot = value;
    }
}

/// Fully populated, type-coerced description of one car submitted for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub make_year: i32,
    pub mileage_kmpl: f64,
    pub engine_cc: i64,
    pub owner_count: i64,
    pub accidents_reported: i64,
    pub fuel_type: String,
    pub brand: String,
    pub transmission: String,
    pub color: String,
    pub service_history: String,
    pub insurance_valid: String,
}

impl VehicleRecord {
    /// Years elapsed since the make year; negative for model years ahead of `current_year`.
    /// Saturates for make years far outside the calendar.
    pub fn age_in_years(&self, current_year: i32) -> i32 {
        current_year.saturating_sub(self.make_year)
    }

    /// Heuristic 1-10 proxy for condition derived from accident and ownership counts.
    pub fn condition_score(&self) -> i64 {
        let penalty = self
            .accidents_reported
            .saturating_add(self.owner_count.saturating_mul(2));
        10i64.saturating_sub(penalty).max(1)
    }

    pub fn has_valid_insurance(&self) -> bool {
        self.insurance_valid == "Yes"
    }

    /// Value of one pipeline column, typed by the column kind.
    pub fn feature(&self, field: FormField) -> Feature<'_> {
        match field {
            FormField::MakeYear => Feature::Numeric(f64::from(self.make_year)),
            FormField::MileageKmpl => Feature::Numeric(self.mileage_kmpl),
            FormField::EngineCc => Feature::Numeric(self.engine_cc as f64),
            FormField::OwnerCount => Feature::Numeric(self.owner_count as f64),
            FormField::AccidentsReported => Feature::Numeric(self.accidents_reported as f64),
            FormField::FuelType => Feature::Categorical(&self.fuel_type),
            FormField::Brand => Feature::Categorical(&self.brand),
            FormField::Transmission => Feature::Categorical(&self.transmission),
            FormField::Color => Feature::Categorical(&self.color),
            FormField::ServiceHistory => Feature::Categorical(&self.service_history),
            FormField::InsuranceValid => Feature::Categorical(&self.insurance_valid),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feature<'a> {
    Numeric(f64),
    Categorical(&'a str),
}
