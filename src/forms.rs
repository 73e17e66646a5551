//! Form payloads for the mutating routes.
//!
//! Every field arrives as an optional string so a missing, blank or malformed
//! value can be turned into a field-level validation message instead of a
//! rejected request body. `clean()` validates a whole form and hands back a
//! typed input for the repository layer.

use serde::Deserialize;

use crate::db::entities::{MilkType, Shift};
use crate::error::AppError;

fn clean_text(field: &'static str, value: Option<&str>) -> Result<String, AppError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn clean_int(field: &'static str, value: Option<&str>) -> Result<i64, AppError> {
    match clean_optional_int(field, value)? {
        Some(parsed) => Ok(parsed),
        None => Err(AppError::validation(format!("{field} is required"))),
    }
}

fn clean_optional_int(field: &'static str, value: Option<&str>) -> Result<Option<i64>, AppError> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| AppError::validation(format!("{field} must be a whole number")))
}

fn clean_float(field: &'static str, value: Option<&str>) -> Result<f64, AppError> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Err(AppError::validation(format!("{field} is required")));
    };
    raw.parse::<f64>()
        .map_err(|_| AppError::validation(format!("{field} must be a number")))
}

/// Customer create/edit form.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerForm {
    pub name: Option<String>,
    pub account_number: Option<String>,
    pub phone: Option<String>,
}

/// Validated customer input.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerInput {
    pub name: String,
    pub account_number: i64,
    pub phone: Option<i64>,
}

impl CustomerForm {
    pub fn clean(&self) -> Result<CustomerInput, AppError> {
        Ok(CustomerInput {
            name: clean_text("name", self.name.as_deref())?,
            account_number: clean_int("account_number", self.account_number.as_deref())?,
            phone: clean_optional_int("phone", self.phone.as_deref())?,
        })
    }
}

/// Milk entry create/edit form. The customer is posted by id; the account
/// number is never accepted from the client.
#[derive(Debug, Default, Deserialize)]
pub struct EntryForm {
    pub customer: Option<String>,
    pub shift: Option<String>,
    pub milk_type: Option<String>,
    pub fat: Option<String>,
    pub quantity: Option<String>,
    pub amount: Option<String>,
}

/// Validated milk entry input.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInput {
    pub customer_id: i32,
    pub shift: Shift,
    pub milk_type: MilkType,
    pub fat: f64,
    pub quantity: f64,
    pub amount: f64,
}

impl EntryForm {
    pub fn clean(&self) -> Result<EntryInput, AppError> {
        let customer_id = clean_int("customer", self.customer.as_deref())?;
        let customer_id = i32::try_from(customer_id)
            .map_err(|_| AppError::validation("customer is not a valid selection"))?;

        let shift = clean_text("shift", self.shift.as_deref())?;
        let shift = Shift::try_from(shift.as_str())
            .map_err(|_| AppError::validation("shift must be one of: day, evening"))?;

        let milk_type = clean_text("milk_type", self.milk_type.as_deref())?;
        let milk_type = MilkType::try_from(milk_type.as_str())
            .map_err(|_| AppError::validation("milk_type must be one of: cow, buffalo"))?;

        Ok(EntryInput {
            customer_id,
            shift,
            milk_type,
            fat: clean_float("fat", self.fat.as_deref())?,
            quantity: clean_float("quantity", self.quantity.as_deref())?,
            amount: clean_float("amount", self.amount.as_deref())?,
        })
    }
}
