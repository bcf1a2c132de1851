use crate::context::ValidatorContext;
use crate::error::Error;
use crate::models::email::{
    BulkEmailRequest, BulkEmailValidationResponse, BulkEmailValidationResult, EmailRequest,
    EmailValidationError, ValidationQuery,
};
use crate::models::validation::ValidationResult;
use crate::session::TrustedEmailValidator;
use actix_web::{HttpResponse, Responder, post, web};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info};

/// # Email Validation Endpoint
///
/// Validates one address and returns the full result record: normalized
/// address, MX findings, classification and trust rating.
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with `email` field (free-form, e.g. `Name <addr>`)
/// - Query Parameters:
///   - `skip_mx_lookup` (optional): skip the DNS query
///   - `trust_cut_off` (optional): 0-100, overrides the service default
///
/// ## Responses
/// - **200 OK**: Validation ran; see `is_valid` / `is_trusted` in the body
/// - **400 Bad Request**: `trust_cut_off` out of range
/// - **500 Internal Server Error**: Reference data or rule configuration problem
///
/// ## Example Request
/// ```text
/// POST /api/v1/validate-email?trust_cut_off=50
/// { "email": "Bill_990@gmail.com" }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/validate-email",
    request_body = EmailRequest,
    params(ValidationQuery),
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 400, description = "Invalid query parameters", body = EmailValidationError),
        (status = 500, description = "Server error", body = EmailValidationError)
    ),
    tag = "Email Validation"
)]
#[post("/validate-email")]
pub async fn validate_email(
    req: web::Json<EmailRequest>,
    query: web::Query<ValidationQuery>,
    context: web::Data<ValidatorContext>,
) -> impl Responder {
    if let Some(response) = reject_bad_cut_off(&query) {
        return response;
    }

    match validate_single_email(context.into_inner(), req.into_inner().email, &query).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => HttpResponse::InternalServerError().json(e),
    }
}

/// # Bulk Email Validation Endpoint
///
/// Validates several addresses concurrently. Each entry carries either a
/// result or the error that prevented validation.
///
/// ## Example Request
/// ```json
/// { "emails": ["user1@example.com", "Shane Devane <thingy@gmail.com>"] }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/bulk-validate-email",
    request_body = BulkEmailRequest,
    params(ValidationQuery),
    responses(
        (status = 200, description = "Bulk validation results", body = BulkEmailValidationResponse),
        (status = 400, description = "Invalid query parameters", body = EmailValidationError)
    ),
    tag = "Email Validation"
)]
#[post("/bulk-validate-email")]
pub async fn validate_emails_bulk(
    req: web::Json<BulkEmailRequest>,
    query: web::Query<ValidationQuery>,
    context: web::Data<ValidatorContext>,
) -> impl Responder {
    if let Some(response) = reject_bad_cut_off(&query) {
        return response;
    }

    let context = context.into_inner();
    let emails = req.into_inner().emails;
    info!("Bulk validation of {} addresses", emails.len());

    let validations = emails.into_iter().map(|email| {
        let context = Arc::clone(&context);
        let query = &query;
        async move {
            let outcome = validate_single_email(context, email.clone(), query).await;
            (email, outcome)
        }
    });

    let mut valid_count = 0;
    let mut invalid_count = 0;
    let results = join_all(validations)
        .await
        .into_iter()
        .map(|(email, outcome)| match outcome {
            Ok(result) => {
                if result.is_valid() {
                    valid_count += 1;
                } else {
                    invalid_count += 1;
                }
                BulkEmailValidationResult {
                    email,
                    result: Some(result),
                    error: None,
                }
            }
            Err(error) => {
                invalid_count += 1;
                BulkEmailValidationResult {
                    email,
                    result: None,
                    error: Some(error),
                }
            }
        })
        .collect();

    HttpResponse::Ok().json(BulkEmailValidationResponse {
        results,
        valid_count,
        invalid_count,
    })
}

/// Runs one session on the blocking pool; the MX query blocks its thread.
pub async fn validate_single_email(
    context: Arc<ValidatorContext>,
    email: String,
    query: &ValidationQuery,
) -> Result<ValidationResult, EmailValidationError> {
    let skip_mx_lookup = query.skip_mx_lookup;
    let trust_cut_off = query.trust_cut_off;

    let outcome = web::block(move || {
        let mut validator = TrustedEmailValidator::new(context, &email);
        if let Some(skip) = skip_mx_lookup {
            validator.set_skip_mx_lookup(skip);
        }
        if let Some(cut_off) = trust_cut_off {
            validator.set_trust_cut_off(cut_off)?;
        }
        validator.as_record()
    })
    .await
    .map_err(|e| EmailValidationError {
        code: "INTERNAL_ERROR".to_string(),
        message: e.to_string(),
    })?;

    outcome.map_err(|e| {
        error!("Validation failed: {}", e);
        EmailValidationError {
            code: error_code(&e).to_string(),
            message: e.to_string(),
        }
    })
}

fn error_code(error: &Error) -> &'static str {
    match error {
        Error::ReferenceData { .. } => "REFERENCE_DATA_ERROR",
        Error::NoTrustRules | Error::InvalidRule { .. } => "TRUST_RULES_ERROR",
        _ => "INTERNAL_ERROR",
    }
}

fn reject_bad_cut_off(query: &ValidationQuery) -> Option<HttpResponse> {
    match query.trust_cut_off {
        Some(cut_off) if cut_off > 100 => Some(HttpResponse::BadRequest().json(EmailValidationError {
            code: "INVALID_CUT_OFF".to_string(),
            message: format!("trust_cut_off must be between 0 and 100, got {cut_off}"),
        })),
        _ => None,
    }
}

/// Configures email validation routes under /api/v1
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(validate_email).service(validate_emails_bulk);
}

#[cfg(test)]
#[path = "email_test.rs"]
mod email_test;
