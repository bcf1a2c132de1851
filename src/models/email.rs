use crate::models::validation::ValidationResult;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct BulkEmailRequest {
    pub emails: Vec<String>,
}

/// Per-request overrides of the service's default session settings.
#[derive(Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct ValidationQuery {
    /// Treat the address as reachable without querying DNS
    pub skip_mx_lookup: Option<bool>,
    /// Rating an address must exceed to be trusted (0-100)
    pub trust_cut_off: Option<u8>,
}

/// Error body returned when validation itself could not run.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct EmailValidationError {
    pub code: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct BulkEmailValidationResult {
    pub email: String,
    pub result: Option<ValidationResult>,
    pub error: Option<EmailValidationError>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct BulkEmailValidationResponse {
    pub results: Vec<BulkEmailValidationResult>,
    pub valid_count: usize,
    pub invalid_count: usize,
}
