use actix_web::{App, HttpServer, web::Data};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trusted_email_validator::openapi::ApiDoc;
use trusted_email_validator::{ValidatorConfig, ValidatorContext};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Trusted Email Validator Service Entry Point
///
/// Loads configuration (including a `.env` file if present), reads the
/// reference lists up front so a bad deployment fails before serving, then
/// launches the Actix-web HTTP server.
///
/// # Endpoints
/// - REST: `/api/v1/...` (configured in routes)
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ValidatorConfig::from_env()?;

    // The resolver owns its own runtime, so build it outside the server's.
    let context = Arc::new(ValidatorContext::from_config(&config)?);
    context.reference().get()?;

    info!("Listening on {}", config.bind_address);
    actix_web::rt::System::new().block_on(serve(Arc::clone(&context), &config.bind_address))?;

    Ok(())
}

async fn serve(context: Arc<ValidatorContext>, bind_address: &str) -> std::io::Result<()> {
    let context = Data::from(context);

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .app_data(context.clone())
            .configure(trusted_email_validator::routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind(bind_address)?
    .run()
    .await
}
