//! Money amounts in request bodies.
//!
//! Amounts travel as decimal strings so no precision is lost to floats.

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::prelude::StatusError;

use crate::extensions::*;

/// Parse a non-negative decimal amount named `field`.
pub(crate) fn parse_amount(field: &str, raw: &str) -> Result<Decimal, StatusError> {
    let amount =
        Decimal::from_str(raw.trim()).or_400(&format!("{field} must be a decimal number"))?;

    if amount.is_sign_negative() {
        return Err(StatusError::bad_request().brief(format!("{field} must not be negative")));
    }

    Ok(amount)
}
