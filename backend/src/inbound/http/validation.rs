//! Request validation for the identify endpoint.
//!
//! The wire contract predates this service: both fields must arrive as
//! JSON strings and neither may be empty or whitespace-only, with the
//! exact rejection messages clients already match on. Validation runs
//! before the resolver so malformed input never reaches the core.

use serde_json::Value;

use crate::domain::Error;

/// Rejection message when a field is missing or not a JSON string.
pub(crate) const FIELDS_MUST_BE_STRINGS: &str = "Both email and phoneNumber must be strings";

/// Rejection message when a field is empty or whitespace-only.
pub(crate) const FIELDS_ARE_MANDATORY: &str = "Both email and phoneNumber are mandatory";

/// Validate the raw payload fields, returning the pair to resolve.
///
/// Values are passed through untrimmed; trimming is only applied to
/// decide emptiness, as the legacy contract requires.
pub(crate) fn validated_pair(
    email: Option<&Value>,
    phone_number: Option<&Value>,
) -> Result<(String, String), Error> {
    let (Some(Value::String(email)), Some(Value::String(phone_number))) = (email, phone_number)
    else {
        return Err(Error::invalid_request(FIELDS_MUST_BE_STRINGS));
    };

    if email.trim().is_empty() || phone_number.trim().is_empty() {
        return Err(Error::invalid_request(FIELDS_ARE_MANDATORY));
    }

    Ok((email.clone(), phone_number.clone()))
}
