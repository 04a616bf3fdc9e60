//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, GenerationError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Generation(GenerationError::UnsupportedDocument(_)) => {
            format!("{}. Convert the map to TM2020 first.", e)
        }
        ApiError::Generation(GenerationError::InvariantViolation { .. }) => {
            format!("{}. The source map was not restored.", e)
        }
        _ => e.to_string(),
    }
}
