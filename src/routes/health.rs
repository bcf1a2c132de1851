use crate::context::ValidatorContext;
use crate::models::HealthResponse;
use actix_web::{HttpResponse, Responder, get, web};

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp
/// and whether the reference lists are loaded.
///
/// ## Response
///
/// - **200 OK**: Service is healthy
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health Check"
)]
#[get("/health")]
pub async fn health(context: web::Data<ValidatorContext>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::up(context.reference().is_loaded()))
}

/// # Route Configuration
///
/// - `GET /health`: Health check endpoint
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
