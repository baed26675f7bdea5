//! Wire-format handling for sheet rows.
//!
//! This is the single place that knows about the spreadsheet's column
//! spellings. Ingress tolerates the historical variants (`descricao` and
//! `descrição`, `fotourl` and `fotoUrl`, numbers where text is expected);
//! egress always writes the canonical unaccented lowercase spellings.

use serde_json::{Value, json};

use motorstand_core::{Vehicle, VehicleDraft, VehicleId};

use super::SheetError;

// =============================================================================
// Envelope
// =============================================================================

/// Pull the row collection out of a list-response envelope.
///
/// The envelope has a single top-level key holding an array. The key name
/// follows the sheet tab name, so we prefer the configured name but fall
/// back to discovering the one array-valued key.
pub(crate) fn extract_collection(body: &Value, preferred: &str) -> Result<Vec<Value>, SheetError> {
    let Some(object) = body.as_object() else {
        return Err(SheetError::MissingCollection(preferred.to_string()));
    };

    if let Some(Value::Array(rows)) = object.get(preferred) {
        return Ok(rows.clone());
    }

    let mut arrays = object.values().filter_map(Value::as_array);
    match (arrays.next(), arrays.next()) {
        (Some(rows), None) => Ok(rows.clone()),
        _ => Err(SheetError::MissingCollection(preferred.to_string())),
    }
}

/// Pull the written record out of a mutation-response envelope.
pub(crate) fn extract_record(body: &Value, preferred: &str) -> Result<Value, SheetError> {
    let Some(object) = body.as_object() else {
        return Err(SheetError::MissingRecord(preferred.to_string()));
    };

    if let Some(record @ Value::Object(_)) = object.get(preferred) {
        return Ok(record.clone());
    }

    let mut objects = object.values().filter(|v| v.is_object());
    match (objects.next(), objects.next()) {
        (Some(record), None) => Ok(record.clone()),
        _ => Err(SheetError::MissingRecord(preferred.to_string())),
    }
}

// =============================================================================
// Vehicles
// =============================================================================

/// Normalize one vehicle row into the canonical record.
///
/// Returns `None` when the row lacks an identifier or a model name; such
/// rows cannot be addressed or displayed and are dropped by the caller.
pub(crate) fn vehicle_from_row(row: &Value) -> Option<Vehicle> {
    let id = int_field(row, "id")?;
    let model = text_field(row, "modelo")?;

    // Unaccented spelling wins when a row carries both column variants.
    let description = text_field(row, "descricao")
        .or_else(|| text_field(row, "descrição"))
        .unwrap_or_default();
    let photo_url = text_field(row, "fotourl")
        .or_else(|| text_field(row, "fotoUrl"))
        .unwrap_or_default();

    Some(Vehicle {
        id: VehicleId::new(id),
        model,
        year: text_field(row, "ano").unwrap_or_default(),
        description,
        photo_url,
    })
}

/// Normalize a list response, dropping unusable rows.
pub(crate) fn vehicles_from_rows(rows: Vec<Value>) -> Vec<Vehicle> {
    rows.iter()
        .filter_map(|row| {
            let vehicle = vehicle_from_row(row);
            if vehicle.is_none() {
                tracing::warn!(row = %row, "Skipping vehicle row without id or model");
            }
            vehicle
        })
        .collect()
}

/// Canonical egress fields for a vehicle create/update body.
pub(crate) fn vehicle_fields(draft: &VehicleDraft) -> Value {
    json!({
        "modelo": draft.model,
        "ano": draft.year,
        "descricao": draft.description,
        "fotourl": draft.photo_url,
    })
}

// =============================================================================
// Users
// =============================================================================

/// A row of the user sheet.
///
/// `password` holds an argon2 PHC hash for accounts created by this
/// application; legacy rows may hold anything, which simply fails
/// verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub username: String,
    pub password: String,
    pub email: String,
    /// Numeric admin flag: 1 grants backoffice access.
    pub admin: i64,
}

/// Normalize one user row. Rows without a username are dropped.
pub(crate) fn user_from_row(row: &Value) -> Option<UserRow> {
    Some(UserRow {
        username: text_field(row, "username")?,
        password: text_field(row, "password").unwrap_or_default(),
        email: text_field(row, "email").unwrap_or_default(),
        admin: int_field(row, "admin").unwrap_or(0),
    })
}

/// Normalize a user list response, dropping unusable rows.
pub(crate) fn users_from_rows(rows: Vec<Value>) -> Vec<UserRow> {
    rows.iter().filter_map(user_from_row).collect()
}

/// Egress fields for a user create body.
pub(crate) fn user_fields(row: &UserRow) -> Value {
    json!({
        "username": row.username,
        "password": row.password,
        "email": row.email,
        "admin": row.admin,
    })
}

// =============================================================================
// Field access
// =============================================================================

/// Read a field as text, accepting numbers the sheet may have coerced.
fn text_field(row: &Value, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a field as an integer, accepting numeric strings.
fn int_field(row: &Value, key: &str) -> Option<i64> {
    match row.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
