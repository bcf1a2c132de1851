use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Generated at compile time from the `utoipa` annotations on the route
/// handlers and models.
///
/// # Endpoints
/// - Health Check: `GET /api/v1/health`
/// - Email Validation: `POST /api/v1/validate-email`
/// - Bulk Email Validation: `POST /api/v1/bulk-validate-email`
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::email::validate_email,
        crate::routes::email::validate_emails_bulk,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::models::email::EmailRequest,
            crate::models::email::BulkEmailRequest,
            crate::models::email::EmailValidationError,
            crate::models::email::BulkEmailValidationResult,
            crate::models::email::BulkEmailValidationResponse,
            crate::models::validation::ValidationResult,
            crate::validation::dnsmx::MxExchange,
        )
    ),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Email Validation", description = "Email validation and trust rating endpoints")
    ),
    info(
        description = "Validates email addresses, resolves their mail exchanges and rates how much they can be trusted",
        title = "Trusted Email Validator API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
