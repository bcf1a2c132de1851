use actix_web::web;

/// # Health Check Endpoint
///
/// ```text
/// GET /api/v1/health
/// ```
pub mod health;

/// # Email Validation Endpoints
///
/// Runs the full validation pipeline and returns the result record.
///
/// ```text
/// POST /api/v1/validate-email
/// POST /api/v1/bulk-validate-email
/// ```
pub mod email;

/// # API Route Configuration
///
/// Sets up versioned API endpoints under the `/api/v1` base path. Handlers
/// expect a `web::Data<ValidatorContext>` in the app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure_routes)
            .configure(email::configure_routes),
    );
}
