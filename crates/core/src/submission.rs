//! Business rules for band-submitted show listings.
//!
//! Each check returns the first violation as a [`CoreError::Validation`]
//! whose `details` name the offending field.

use serde_json::json;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Accepted `age_restriction` values.
pub const AGE_RESTRICTIONS: &[&str] = &["All Ages", "18+", "21+"];

/// Status assigned to every submitted show.
pub const STATUS_SCHEDULED: &str = "scheduled";

pub const SOURCE_MANUAL: &str = "manual";
pub const SOURCE_BAND_SUBMITTED: &str = "band_submitted";

/// Reject show dates strictly before `now`.
pub fn ensure_future(date: Timestamp, now: Timestamp) -> Result<(), CoreError> {
    if date < now {
        return Err(CoreError::validation(
            "Invalid date",
            json!({ "date": "must be a future date" }),
        ));
    }
    Ok(())
}

/// Largest price a `NUMERIC(10,2)` column holds.
pub const MAX_PRICE: f64 = 99_999_999.99;

/// Prices must lie in `[0, MAX_PRICE]` and `price_max >= price_min` when
/// both are set.
pub fn validate_prices(price_min: Option<f64>, price_max: Option<f64>) -> Result<(), CoreError> {
    check_price("price_min", price_min)?;
    check_price("price_max", price_max)?;
    if let (Some(min), Some(max)) = (price_min, price_max) {
        if max < min {
            return Err(CoreError::validation(
                "Invalid price range",
                json!({ "price_max": "must be >= price_min" }),
            ));
        }
    }
    Ok(())
}

fn check_price(field: &str, price: Option<f64>) -> Result<(), CoreError> {
    let problem = match price {
        Some(p) if p < 0.0 => "must be >= 0".to_string(),
        Some(p) if p > MAX_PRICE => format!("must be <= {MAX_PRICE}"),
        _ => return Ok(()),
    };
    Err(CoreError::validation("Invalid price", json!({ field: problem })))
}

/// An absent restriction is fine; a present one must be in [`AGE_RESTRICTIONS`].
pub fn validate_age_restriction(value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if !AGE_RESTRICTIONS.contains(&v) => {
            let allowed = AGE_RESTRICTIONS.join(", ");
            Err(CoreError::validation(
                "Invalid age restriction",
                json!({ "age_restriction": format!("must be one of: {allowed}") }),
            ))
        }
        _ => Ok(()),
    }
}

/// Every band name must be non-empty after trimming. The error reports the
/// index of the first offender.
pub fn validate_band_names<'a, I>(names: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = &'a str>,
{
    for (index, name) in names.into_iter().enumerate() {
        if name.trim().is_empty() {
            return Err(CoreError::validation(
                "Invalid band",
                json!({ "bands": { "index": index, "name": "must not be empty" } }),
            ));
        }
    }
    Ok(())
}
