//! Record ids taken from the URL path.
//!
//! Segments are extracted as text so a malformed id is answered with the
//! JSON error body instead of axum's plain-text rejection. A segment that is
//! not all digits names no resource and is a 404. Digits too large for `u64`
//! are a well-formed id that cannot match any record, so they surface as
//! `None`: lookups treat that as a miss and deletes as a no-op.

use axum::extract::{rejection::PathRejection, Path};
use axum::http::StatusCode;

use crate::errors::JsonApiError;

pub type IdPath = Result<Path<String>, PathRejection>;
pub type IdPairPath = Result<Path<(String, String)>, PathRejection>;

fn not_found(detail: String) -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(detail))
}

fn parse(raw: &str) -> Result<Option<u64>, JsonApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found(format!("not a record id: {raw}")));
    }
    Ok(raw.parse::<u64>().ok())
}

fn segments<T>(path: Result<Path<T>, PathRejection>) -> Result<T, JsonApiError> {
    path.map(|Path(inner)| inner).map_err(|rejection| not_found(rejection.body_text()))
}

fn unknown(raw: &str) -> JsonApiError {
    not_found(format!("no record with id {raw}"))
}

pub fn optional_id(path: IdPath) -> Result<Option<u64>, JsonApiError> {
    parse(&segments(path)?)
}

pub fn required_id(path: IdPath) -> Result<u64, JsonApiError> {
    let raw = segments(path)?;
    parse(&raw)?.ok_or_else(|| unknown(&raw))
}

/// Both segments must be well formed before either one can miss.
pub fn optional_ids(path: IdPairPath) -> Result<Option<(u64, u64)>, JsonApiError> {
    let (business, review) = segments(path)?;
    Ok(parse(&business)?.zip(parse(&review)?))
}

pub fn required_ids(path: IdPairPath) -> Result<(u64, u64), JsonApiError> {
    let (business, review) = segments(path)?;
    match (parse(&business)?, parse(&review)?) {
        (Some(b), Some(r)) => Ok((b, r)),
        (None, _) => Err(unknown(&business)),
        (_, None) => Err(unknown(&review)),
    }
}
