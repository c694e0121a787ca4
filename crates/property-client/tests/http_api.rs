//! HTTP adapter tests against a local actix server.
//!
//! The server records how often each route is hit so retry behaviour is
//! observable end to end.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, web};
use pagination::PageRequest;
use rstest::rstest;
use serde_json::json;
use url::Url;

use property_client::ClientError;
use property_client::api::{HttpPropertyApi, PropertyApi};
use property_client::model::{Amount, ListQuery, PropertyPayload, PropertyStatus};
use property_client::retry::RetryPolicy;

#[derive(Default)]
struct Hits(AtomicUsize);

impl Hits {
    fn record(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

fn property_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Sunny loft",
        "amount": {"price": 1234, "currency": "USD"},
        "location": "Austin, Texas",
        "bedrooms": 2,
        "bathrooms": 1,
        "status": "available",
        "createdAt": "2025-01-02T03:04:05Z",
        "updatedAt": "2025-01-02T03:04:05Z"
    })
}

async fn listing(hits: web::Data<Hits>, query: web::Query<HashMap<String, String>>) -> HttpResponse {
    hits.record();
    let take = query
        .get("take")
        .and_then(|take| take.parse::<u32>().ok())
        .unwrap_or(10);
    let mut record = property_json("65f0c0ffee00000000000001");
    if let Some(search) = query.get("search") {
        record["title"] = json!(search);
    }
    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Properties fetched successfully",
        "statusCode": 200,
        "data": [record],
        "meta": {
            "totalItems": 11,
            "itemCount": 1,
            "itemsPerPage": take,
            "totalPages": 2,
            "currentPage": 2
        }
    }))
}

async fn unavailable(hits: web::Data<Hits>) -> HttpResponse {
    hits.record();
    HttpResponse::ServiceUnavailable().json(json!({
        "status": "fail",
        "message": "Service degraded - database unavailable",
        "statusCode": 503,
        "code": "service_unavailable"
    }))
}

async fn not_found(hits: web::Data<Hits>) -> HttpResponse {
    hits.record();
    HttpResponse::NotFound().json(json!({
        "status": "fail",
        "message": "Property not found",
        "statusCode": 404,
        "code": "not_found"
    }))
}

async fn created(hits: web::Data<Hits>, body: web::Json<serde_json::Value>) -> HttpResponse {
    hits.record();
    let mut record = property_json("65f0c0ffee00000000000002");
    record["amount"] = body["amount"].clone();
    HttpResponse::Created().json(json!({
        "status": "success",
        "message": "Property created successfully",
        "statusCode": 201,
        "data": record
    }))
}

async fn deleted_without_data(hits: web::Data<Hits>) -> HttpResponse {
    hits.record();
    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Property deleted successfully",
        "statusCode": 200
    }))
}

async fn deleted_with_data(hits: web::Data<Hits>) -> HttpResponse {
    hits.record();
    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Property deleted successfully",
        "statusCode": 200,
        "data": property_json("65f0c0ffee00000000000003")
    }))
}

async fn slow(hits: web::Data<Hits>) -> HttpResponse {
    hits.record();
    actix_web::rt::time::sleep(Duration::from_millis(500)).await;
    HttpResponse::Ok().finish()
}

/// Start a server with the given routes and return its base URL.
fn serve(hits: web::Data<Hits>, routes: fn(&mut web::ServiceConfig)) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let server = HttpServer::new(move || App::new().app_data(hits.clone()).configure(routes))
        .workers(1)
        .listen(listener)
        .expect("listen")
        .run();
    actix_web::rt::spawn(server);
    Url::parse(&format!("http://{addr}")).expect("server url")
}

fn client(base: Url, retries: u32, timeout: Duration) -> HttpPropertyApi {
    HttpPropertyApi::new(
        base,
        timeout,
        RetryPolicy::new(retries, Duration::from_millis(5)),
    )
    .expect("client builds")
}

fn payload() -> PropertyPayload {
    PropertyPayload {
        title: "Sunny loft".to_owned(),
        amount: Amount {
            price: 1234,
            currency: "USD".to_owned(),
        },
        location: "Austin, Texas".to_owned(),
        bedrooms: 2,
        bathrooms: 1,
        status: PropertyStatus::Available,
    }
}

#[rstest]
#[actix_web::test]
async fn service_unavailable_is_attempted_four_times() {
    let hits = web::Data::new(Hits::default());
    let base = serve(hits.clone(), |cfg| {
        cfg.route("/properties/statistics", web::get().to(unavailable));
    });

    let error = client(base, 3, Duration::from_secs(5))
        .statistics()
        .await
        .expect_err("statistics fail");

    assert_eq!(
        error,
        ClientError::Server {
            status: 503,
            message: "Service degraded - database unavailable".to_owned(),
        }
    );
    assert_eq!(hits.count(), 4);
}

#[rstest]
#[actix_web::test]
async fn not_found_is_attempted_once() {
    let hits = web::Data::new(Hits::default());
    let base = serve(hits.clone(), |cfg| {
        cfg.route("/properties/{id}", web::delete().to(not_found));
    });

    let error = client(base, 3, Duration::from_secs(5))
        .delete("65f0c0ffee00000000000009")
        .await
        .expect_err("delete fails");

    assert_eq!(error.status(), Some(404));
    assert_eq!(error.user_message(), "Property not found");
    assert_eq!(hits.count(), 1);
}

#[rstest]
#[actix_web::test]
async fn delete_accepts_success_envelope_without_data() {
    let hits = web::Data::new(Hits::default());
    let base = serve(hits.clone(), |cfg| {
        cfg.route("/properties/{id}", web::delete().to(deleted_without_data));
    });

    let deleted = client(base, 3, Duration::from_secs(5))
        .delete("65f0c0ffee00000000000003")
        .await
        .expect("delete succeeds");

    assert!(deleted.is_none());
    assert_eq!(hits.count(), 1);
}

#[rstest]
#[actix_web::test]
async fn delete_returns_echoed_record() {
    let hits = web::Data::new(Hits::default());
    let base = serve(hits.clone(), |cfg| {
        cfg.route("/properties/{id}", web::delete().to(deleted_with_data));
    });

    let deleted = client(base, 0, Duration::from_secs(5))
        .delete("65f0c0ffee00000000000003")
        .await
        .expect("delete succeeds");

    assert_eq!(
        deleted.map(|property| property.id).as_deref(),
        Some("65f0c0ffee00000000000003")
    );
}

#[rstest]
#[actix_web::test]
async fn listing_sends_paging_and_search() {
    let hits = web::Data::new(Hits::default());
    let base = serve(hits.clone(), |cfg| {
        cfg.route("/properties", web::get().to(listing));
    });
    let query = ListQuery::new(PageRequest::new(2, 5).expect("valid page"), " loft ");

    let page = client(base, 0, Duration::from_secs(5))
        .list(&query)
        .await
        .expect("listing succeeds");

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data.first().map(|p| p.title.as_str()), Some("loft"));
    assert_eq!(page.meta.items_per_page, 5);
    assert_eq!(page.meta.total_pages, 2);
    assert_eq!(hits.count(), 1);
}

#[rstest]
#[actix_web::test]
async fn create_round_trips_minor_units() {
    let hits = web::Data::new(Hits::default());
    let base = serve(hits.clone(), |cfg| {
        cfg.route("/properties", web::post().to(created));
    });

    let property = client(base, 0, Duration::from_secs(5))
        .create(&payload())
        .await
        .expect("create succeeds");

    assert_eq!(property.amount.price, 1234);
}

#[rstest]
#[actix_web::test]
async fn slow_responses_time_out() {
    let hits = web::Data::new(Hits::default());
    let base = serve(hits.clone(), |cfg| {
        cfg.route("/properties/statistics", web::get().to(slow));
    });

    let error = client(base, 1, Duration::from_millis(50))
        .statistics()
        .await
        .expect_err("request times out");

    assert!(matches!(error, ClientError::Timeout { .. }), "{error:?}");
    assert_eq!(hits.count(), 2);
}

#[rstest]
#[actix_web::test]
async fn refused_connections_are_transport_failures() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let base = Url::parse(&format!("http://{addr}")).expect("url");

    let error = client(base, 1, Duration::from_secs(5))
        .statistics()
        .await
        .expect_err("nothing listens");

    assert!(matches!(error, ClientError::Transport { .. }), "{error:?}");
}

#[rstest]
#[actix_web::test]
async fn shared_client_is_usable_across_tasks() {
    let hits = web::Data::new(Hits::default());
    let base = serve(hits.clone(), |cfg| {
        cfg.route("/properties", web::get().to(listing));
    });
    let api: Arc<dyn PropertyApi> = Arc::new(client(base, 0, Duration::from_secs(5)));
    let query = ListQuery::new(PageRequest::default(), "");

    let (first, second) = tokio::join!(api.list(&query), api.list(&query));

    assert!(first.is_ok() && second.is_ok());
    assert_eq!(hits.count(), 2);
}
