/// # Health Status Response
///
/// Operational status of the service with a timestamp and whether the
/// reference lists have been loaded.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2024-03-10T15:30:45.123456789Z",
///   "reference_data_loaded": true
/// }
/// ```
pub mod health;

/// Request and response bodies of the validation endpoints.
pub mod email;

/// The validation result record and its sub-records.
pub mod validation;

pub use health::HealthResponse;
pub use validation::ValidationResult;
