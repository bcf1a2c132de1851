use super::*;
use crate::trust::TrustRules;
use crate::validation::dnsmx::{MockLookupMx, MxExchange, MxLookupError};
use crate::validation::reference::{ReferenceData, ReferenceLists};
use actix_web::{App, test};
use serde_json::{Value, json};

fn test_context(rules: TrustRules) -> web::Data<ValidatorContext> {
    let mut resolver = MockLookupMx::new();
    resolver.expect_lookup_mx().returning(|host| match host {
        "gmail.com" => Ok(vec![
            MxExchange::new("gmail-smtp-in.l.google.com.", 5),
            MxExchange::new("alt1.gmail-smtp-in.l.google.com.", 10),
        ]),
        other => Err(MxLookupError::NxDomain(format!("{other} does not exist"))),
    });

    let lists = ReferenceLists {
        free_providers: ["gmail.com".to_string()].into(),
        common_usernames: ["contact".to_string()].into(),
    };

    web::Data::new(
        ValidatorContext::new(ReferenceData::preloaded(lists), Arc::new(resolver)).with_rules(rules),
    )
}

async fn create_test_app(
    rules: TrustRules,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(test_context(rules))
            .configure(configure_routes),
    )
    .await
}

#[actix_web::test]
async fn test_valid_email_returns_record() {
    let app = create_test_app(TrustRules::default()).await;
    let req = test::TestRequest::post()
        .uri("/validate-email")
        .set_json(json!({ "email": "Bill_990@gmail.com" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "Bill_990@gmail.com");
    assert_eq!(body["is_valid"], true);
    assert_eq!(body["is_free"], true);
    assert_eq!(body["mx_count"], 2);
    assert_eq!(body["is_trusted"], false);
    assert_eq!(body["trust_cut_off"], 60);
    assert!(body["checked_at"].is_i64());
}

#[actix_web::test]
async fn test_query_overrides_settings() {
    let app = create_test_app(TrustRules::default()).await;
    let req = test::TestRequest::post()
        .uri("/validate-email?trust_cut_off=10&skip_mx_lookup=true")
        .set_json(json!({ "email": "Bill_990@gmail.com" }))
        .to_request();

    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(body["is_valid"], true);
    assert_eq!(body["is_trusted"], true);
    assert_eq!(body["skip_mx_lookup"], true);
    assert_eq!(body["mx_count"], 0);
}

#[actix_web::test]
async fn test_invalid_syntax_is_still_ok_response() {
    let app = create_test_app(TrustRules::default()).await;
    let req = test::TestRequest::post()
        .uri("/validate-email")
        .set_json(json!({ "email": "invalid-email" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["is_email"], false);
    assert_eq!(body["is_valid"], false);
}

#[actix_web::test]
async fn test_unknown_domain_reports_lookup_failure() {
    let app = create_test_app(TrustRules::default()).await;
    let req = test::TestRequest::post()
        .uri("/validate-email")
        .set_json(json!({ "email": "test@nonexistent.invalid" }))
        .to_request();

    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(body["is_valid"], false);
    assert_eq!(body["lookup_failed"], true);
    assert!(
        body["failure_reason"]
            .as_str()
            .unwrap()
            .contains("does not exist")
    );
}

#[actix_web::test]
async fn test_cut_off_out_of_range_is_rejected() {
    let app = create_test_app(TrustRules::default()).await;
    let req = test::TestRequest::post()
        .uri("/validate-email?trust_cut_off=150")
        .set_json(json!({ "email": "bill@gmail.com" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_CUT_OFF");
}

#[actix_web::test]
async fn test_missing_rules_is_server_error() {
    let app = create_test_app(TrustRules::empty()).await;
    let req = test::TestRequest::post()
        .uri("/validate-email")
        .set_json(json!({ "email": "bill@gmail.com" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "TRUST_RULES_ERROR");
}

#[actix_web::test]
async fn test_missing_email_field_is_bad_request() {
    let app = create_test_app(TrustRules::default()).await;
    let req = test::TestRequest::post()
        .uri("/validate-email")
        .set_json(json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_bulk_validation_counts() {
    let app = create_test_app(TrustRules::default()).await;
    let req = test::TestRequest::post()
        .uri("/bulk-validate-email")
        .set_json(json!({
            "emails": [
                "Shane Devane <thingy@gmail.com>",
                "contact@gmail.com",
                "",
                "test@nonexistent.invalid"
            ]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["valid_count"], 2);
    assert_eq!(body["invalid_count"], 2);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["email"], "Shane Devane <thingy@gmail.com>");
    assert_eq!(results[0]["result"]["email"], "thingy@gmail.com");
    assert_eq!(results[1]["result"]["is_common"], true);
    assert!(results[2]["error"].is_null());
}

#[actix_web::test]
async fn test_bulk_validation_reports_per_address_errors() {
    let app = create_test_app(TrustRules::empty()).await;
    let req = test::TestRequest::post()
        .uri("/bulk-validate-email")
        .set_json(json!({ "emails": ["bill@gmail.com", "not an email"] }))
        .to_request();

    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(body["valid_count"], 0);
    assert_eq!(body["invalid_count"], 2);
    assert_eq!(body["results"][0]["error"]["code"], "TRUST_RULES_ERROR");
    assert_eq!(body["results"][1]["result"]["is_email"], false);
}
