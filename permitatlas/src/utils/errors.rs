use thiserror::Error;

/// # PermitError
/// Error taxonomy for catalog construction, scenario validation and
/// simulation. Clamped demand is not an error; it is recorded on the
/// simulation record instead.
#[derive(Debug, Error)]
pub enum PermitError {
    #[error("Invalid catalog entry: {0}")]
    InvalidCatalogErr(String),
    #[error("Missing segment: {0}")]
    MissingSegmentErr(String),
    #[error("Invalid value: {0}")]
    InvalidValueErr(String),
    #[error("Not found: {0}")]
    NotFoundErr(String),
    #[error("Error while parsing: {0}")]
    ParsingErr(String),
}

pub type Result<T> = std::result::Result<T, PermitError>;

impl From<PermitError> for String {
    fn from(e: PermitError) -> Self {
        e.to_string()
    }
}
