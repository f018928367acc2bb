use shared_types::AppError;

use crate::dataset::DatasetError;

/// Convert a load failure into an AppError.
///
/// Every variant means the case table cannot be served, so all of them
/// surface as `DatasetUnavailable`.
pub fn dataset_to_app_error(err: DatasetError) -> AppError {
    tracing::error!(error = %err, "case table unavailable");
    AppError::dataset_unavailable(public_message(&err))
}

/// Description of a load failure that is safe to show to clients.
/// Filesystem paths are never included.
pub fn public_message(err: &DatasetError) -> String {
    match err {
        DatasetError::Io { .. } => "Case table source is not readable".to_string(),
        DatasetError::Malformed { message, .. } => format!("malformed case table: {}", message),
        _ => err.to_string(),
    }
}

impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        dataset_to_app_error(err)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
