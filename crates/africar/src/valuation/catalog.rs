use super::domain::{FormField, VehicleForm};
use serde::Serialize;
use serde_json::Value;

pub const BRANDS: &[&str] = &[
    "Chevrolet",
    "Honda",
    "BMW",
    "Hyundai",
    "Nissan",
    "Tesla",
    "Toyota",
    "Kia",
    "Volkswagen",
    "Ford",
];
pub const FUEL_TYPES: &[&str] = &["Petrol", "Diesel", "Electric"];
pub const TRANSMISSIONS: &[&str] = &["Manual", "Automatic"];
pub const COLORS: &[&str] = &["White", "Silver", "Black", "Red", "Blue", "Gray"];
pub const SERVICE_HISTORY: &[&str] = &["Full", "Partial"];
pub const INSURANCE: &[&str] = &["Yes", "No"];

/// Inclusive bounds suggested by the numeric input widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldBounds {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub fn bounds(field: FormField) -> Option<FieldBounds> {
    match field {
        FormField::MakeYear => Some(FieldBounds::new(1995.0, 2023.0, 1.0)),
        FormField::MileageKmpl => Some(FieldBounds::new(5.0, 35.0, 0.1)),
        FormField::EngineCc => Some(FieldBounds::new(800.0, 5000.0, 1.0)),
        FormField::OwnerCount => Some(FieldBounds::new(1.0, 5.0, 1.0)),
        FormField::AccidentsReported => Some(FieldBounds::new(0.0, 5.0, 1.0)),
        _ => None,
    }
}

pub fn options(field: FormField) -> Option<&'static [&'static str]> {
    match field {
        FormField::FuelType => Some(FUEL_TYPES),
        FormField::Brand => Some(BRANDS),
        FormField::Transmission => Some(TRANSMISSIONS),
        FormField::Color => Some(COLORS),
        FormField::ServiceHistory => Some(SERVICE_HISTORY),
        FormField::InsuranceValid => Some(INSURANCE),
        _ => None,
    }
}

pub fn is_known_brand(brand: &str) -> bool {
    BRANDS.contains(&brand)
}

/// Form pre-filled with the values shown on first load.
pub fn default_form() -> VehicleForm {
    VehicleForm {
        make_year: Some(Value::from(2018)),
        mileage_kmpl: Some(Value::from(15)),
        engine_cc: Some(Value::from(1500)),
        owner_count: Some(Value::from(1)),
        accidents_reported: Some(Value::from(0)),
        fuel_type: Some(Value::from("Petrol")),
        brand: Some(Value::from("Chevrolet")),
        transmission: Some(Value::from("Manual")),
        color: Some(Value::from("White")),
        service_history: Some(Value::from("Full")),
        insurance_valid: Some(Value::from("Yes")),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormFieldSpec {
    pub field: FormField,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<FieldBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static [&'static str]>,
    pub default: Option<Value>,
}

/// Everything a presentation layer needs to render the valuation form.
#[derive(Debug, Clone, Serialize)]
pub struct FormCatalog {
    pub fields: Vec<FormFieldSpec>,
}

impl FormCatalog {
    pub fn standard() -> Self {
        let defaults = default_form();
        let fields = FormField::ordered()
            .into_iter()
            .map(|field| FormFieldSpec {
                field,
                label: field.label(),
                bounds: bounds(field),
                options: options(field),
                default: defaults.get(field).cloned(),
            })
            .collect();
        Self { fields }
    }
}
