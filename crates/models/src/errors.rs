use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("field {field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}
