//! Handler tests over mocked driving ports.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};
use pagination::Paginated;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::ports::{MockPropertyCommand, MockPropertyQuery};
use crate::domain::{
    Error, Property, PropertyDraft, PropertyDraftInput, PropertyId, PropertyStatistics,
    TRACE_ID_HEADER,
};
use crate::inbound::http::test_utils::{init_app, mock_state};

const ID: &str = "65f0c0ffee00000000000001";

#[fixture]
fn body() -> Value {
    json!({
        "title": "Sunny loft",
        "amount": {"price": 1234, "currency": "usd"},
        "location": "Austin, Texas",
        "bedrooms": 2,
        "bathrooms": 1,
    })
}

fn sample_property() -> Property {
    let draft = PropertyDraft::try_from_input(PropertyDraftInput {
        title: "Sunny loft".into(),
        price: 1234,
        currency: "USD".into(),
        location: "Austin, Texas".into(),
        bedrooms: 2,
        bathrooms: 1,
        status: None,
    })
    .expect("valid draft");
    let at = Utc
        .with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp");
    Property::from_draft(PropertyId::parse(ID).expect("valid id"), draft, at, at)
}

#[rstest]
#[actix_web::test]
async fn list_returns_envelope_with_meta() {
    let mut query = MockPropertyQuery::new();
    query
        .expect_list()
        .withf(|filter| {
            filter.page.page() == 2
                && filter.page.take() == 5
                && filter.search.as_ref().map(|term| term.as_str()) == Some("loft")
        })
        .return_once(|filter| Ok(Paginated::new(vec![sample_property()], filter.page, 6)));
    let app = init_app(mock_state(query, MockPropertyCommand::new())).await;

    let request = actix_test::TestRequest::get()
        .uri("/properties?page=2&take=5&search=%20loft%20")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Properties fetched successfully");
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["data"][0]["id"], ID);
    assert_eq!(body["data"][0]["amount"], json!({"price": 1234, "currency": "USD"}));
    assert_eq!(
        body["meta"],
        json!({"totalItems": 6, "itemCount": 1, "itemsPerPage": 5, "totalPages": 2, "currentPage": 2})
    );
}

#[rstest]
#[case("/properties?page=0")]
#[case("/properties?take=101")]
#[case("/properties?page=abc")]
#[case("/properties?page=-1")]
#[actix_web::test]
async fn invalid_listing_queries_are_rejected_before_the_service(#[case] uri: &str) {
    let app = init_app(mock_state(MockPropertyQuery::new(), MockPropertyCommand::new())).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["code"], "invalid_request");
    assert!(body["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn create_returns_201(body: Value) {
    let mut command = MockPropertyCommand::new();
    command
        .expect_create()
        .withf(|draft| draft.amount().currency.as_str() == "USD")
        .return_once(|_| Ok(sample_property()));
    let app = init_app(mock_state(MockPropertyQuery::new(), command)).await;

    let request = actix_test::TestRequest::post()
        .uri("/properties")
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Property created successfully");
    assert_eq!(body["data"]["status"], "available");
    assert_eq!(body["data"]["createdAt"], "2025-01-02T03:04:05Z");
}

#[rstest]
#[actix_web::test]
async fn create_rejects_short_title_with_details(mut body: Value) {
    body["title"] = json!("ab");
    let app = init_app(mock_state(MockPropertyQuery::new(), MockPropertyCommand::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/properties")
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"], json!({"field": "title", "code": "length_out_of_range"}));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_400() {
    let app = init_app(mock_state(MockPropertyQuery::new(), MockPropertyCommand::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/properties")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"title\":")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_json");
}

#[rstest]
#[actix_web::test]
async fn write_failures_surface_as_422(body: Value) {
    let mut command = MockPropertyCommand::new();
    command
        .expect_create()
        .return_once(|_| Err(Error::unprocessable("Failed to create property")));
    let app = init_app(mock_state(MockPropertyQuery::new(), command)).await;

    let request = actix_test::TestRequest::post()
        .uri("/properties")
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Failed to create property");
    assert_eq!(body["code"], "unprocessable_entity");
}

#[rstest]
#[actix_web::test]
async fn replace_with_malformed_id_never_reaches_the_service(body: Value) {
    let app = init_app(mock_state(MockPropertyQuery::new(), MockPropertyCommand::new())).await;

    let request = actix_test::TestRequest::put()
        .uri("/properties/123")
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "id");
}

#[rstest]
#[actix_web::test]
async fn replace_returns_updated_record(body: Value) {
    let mut command = MockPropertyCommand::new();
    command
        .expect_replace()
        .withf(|id, _| id.as_str() == ID)
        .return_once(|_, _| Ok(sample_property()));
    let app = init_app(mock_state(MockPropertyQuery::new(), command)).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/properties/{ID}"))
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Property updated successfully");
}

#[rstest]
#[actix_web::test]
async fn delete_missing_property_is_404() {
    let mut command = MockPropertyCommand::new();
    command
        .expect_delete()
        .return_once(|_| Err(Error::not_found("Property not found")));
    let app = init_app(mock_state(MockPropertyQuery::new(), command)).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/properties/{ID}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Property not found");
}

#[rstest]
#[actix_web::test]
async fn statistics_are_wrapped() {
    let mut query = MockPropertyQuery::new();
    query
        .expect_statistics()
        .return_once(|| Ok(PropertyStatistics::default()));
    let app = init_app(mock_state(query, MockPropertyCommand::new())).await;

    let request = actix_test::TestRequest::get()
        .uri("/properties/statistics")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["data"],
        json!({
            "totalProperties": 0,
            "averagePrice": {},
            "statusCount": {"available": 0, "sold": 0},
            "locationStats": [],
        })
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_routes_get_the_error_envelope() {
    let app = init_app(mock_state(MockPropertyQuery::new(), MockPropertyCommand::new())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/nope").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Route not found");
}
