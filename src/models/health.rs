use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Health Status Response
///
/// Used as the response format for the health check endpoint.
///
/// ## Fields
/// - `status`: "UP" once the service is serving requests
/// - `timestamp`: ISO 8601 formatted timestamp of the status check
/// - `reference_data_loaded`: whether the provider and username lists are in memory
#[derive(Serialize, Debug, PartialEq, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub reference_data_loaded: bool,
}

impl HealthResponse {
    pub fn up(reference_data_loaded: bool) -> Self {
        Self {
            status: "UP".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            reference_data_loaded,
        }
    }
}
