use super::catalog;
use super::domain::{Feature, FormField, VehicleForm, VehicleRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether widget bounds and option sets are re-checked on submission.
///
/// `Permissive` passes out-of-range numbers and unlisted categories straight through to the
/// pricing pipeline; `Strict` rejects them before any prediction is attempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    #[default]
    Permissive,
    Strict,
}

/// Reasons a raw form cannot become a `VehicleRecord`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill all fields")]
    Incomplete { missing: Vec<FormField> },
    #[error("{field} expects {expected}, received {found}")]
    InvalidField {
        field: FormField,
        expected: &'static str,
        found: String,
    },
    #[error("{field} value {value} is outside the accepted range [{min}, {max}]")]
    OutOfRange {
        field: FormField,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} value '{value}' is not one of the listed options")]
    UnknownLevel { field: FormField, value: String },
}

impl ValidationError {
    pub fn missing_fields(&self) -> &[FormField] {
        match self {
            ValidationError::Incomplete { missing } => missing,
            _ => &[],
        }
    }
}

/// Checks completeness, coerces every field to the pipeline schema, and applies `policy`.
pub fn validate(
    form: &VehicleForm,
    policy: ValidationPolicy,
) -> Result<VehicleRecord, ValidationError> {
    let missing: Vec<FormField> = FormField::ordered()
        .into_iter()
        .filter(|field| is_absent(form.get(*field)))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::Incomplete { missing });
    }

    let make_year = integer(form, FormField::MakeYear)?;
    let make_year = i32::try_from(make_year).map_err(|_| ValidationError::InvalidField {
        field: FormField::MakeYear,
        expected: "a calendar year",
        found: make_year.to_string(),
    })?;

    let record = VehicleRecord {
        make_year,
        mileage_kmpl: float(form, FormField::MileageKmpl)?,
        engine_cc: integer(form, FormField::EngineCc)?,
        owner_count: integer(form, FormField::OwnerCount)?,
        accidents_reported: integer(form, FormField::AccidentsReported)?,
        fuel_type: text(form, FormField::FuelType)?,
        brand: text(form, FormField::Brand)?,
        transmission: text(form, FormField::Transmission)?,
        color: text(form, FormField::Color)?,
        service_history: text(form, FormField::ServiceHistory)?,
        insurance_valid: text(form, FormField::InsuranceValid)?,
    };

    if policy == ValidationPolicy::Strict {
        enforce_catalog(&record)?;
    }

    Ok(record)
}

fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(raw)) => raw.trim().is_empty(),
        Some(_) => false,
    }
}

fn present(form: &VehicleForm, field: FormField) -> &Value {
    // Completeness is checked before any coercion runs.
    form.get(field).unwrap_or(&Value::Null)
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(raw) => format!("'{raw}'"),
        other => other.to_string(),
    }
}

fn integer(form: &VehicleForm, field: FormField) -> Result<i64, ValidationError> {
    let value = present(form, field);
    let invalid = || ValidationError::InvalidField {
        field,
        expected: "a whole number",
        found: describe(value),
    };

    match value {
        Value::Number(number) => match number.as_i64() {
            Some(whole) => Ok(whole),
            None => number.as_f64().and_then(truncate).ok_or_else(invalid),
        },
        Value::String(raw) => {
            let raw = raw.trim();
            match raw.parse::<i64>() {
                Ok(whole) => Ok(whole),
                Err(_) => raw
                    .parse::<f64>()
                    .ok()
                    .and_then(truncate)
                    .ok_or_else(invalid),
            }
        }
        _ => Err(invalid()),
    }
}

/// Fractional input truncates toward zero like an int64 cast.
fn truncate(real: f64) -> Option<i64> {
    (real.is_finite() && real.abs() < i64::MAX as f64).then(|| real.trunc() as i64)
}

fn float(form: &VehicleForm, field: FormField) -> Result<f64, ValidationError> {
    let value = present(form, field);
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|real| real.is_finite())
        .ok_or_else(|| ValidationError::InvalidField {
            field,
            expected: "a number",
            found: describe(value),
        })
}

fn text(form: &VehicleForm, field: FormField) -> Result<String, ValidationError> {
    match present(form, field) {
        Value::String(raw) => Ok(raw.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(true) => Ok("True".to_string()),
        Value::Bool(false) => Ok("False".to_string()),
        other => Err(ValidationError::InvalidField {
            field,
            expected: "a text value",
            found: describe(other),
        }),
    }
}

fn enforce_catalog(record: &VehicleRecord) -> Result<(), ValidationError> {
    for field in FormField::ordered() {
        match record.feature(field) {
            Feature::Numeric(value) => {
                let Some(bounds) = catalog::bounds(field) else {
                    continue;
                };
                if !bounds.contains(value) {
                    return Err(ValidationError::OutOfRange {
                        field,
                        value,
                        min: bounds.min,
                        max: bounds.max,
                    });
                }
            }
            Feature::Categorical(value) => {
                let Some(options) = catalog::options(field) else {
                    continue;
                };
                if !options.contains(&value) {
                    return Err(ValidationError::UnknownLevel {
                        field,
                        value: value.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
