//! Behaviour of the HTTP surface when the barcode store is unavailable.
//!
//! A failed write must surface as a server error and must never leave a
//! phantom record behind; internal failure detail must not leak to clients.

use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use backend::domain::ports::{BarcodeRepository, BarcodeRepositoryError};
use backend::domain::{BarcodeLifecycle, BarcodeRecord, NewBarcode, UserId, Username};
use backend::inbound::http::state::HttpState;
use backend::middleware::SessionGate;
use backend::outbound::persistence::InMemoryLoginService;
use backend::outbound::render::SvgBarcodeRenderer;
use backend::server::{configure_routes, session_middleware};

const USERNAME: &str = "admin";
const PASSWORD: &str = "password";

/// Store double whose writes fail while reads see an empty store.
struct WriteFailingRepository;

#[async_trait]
impl BarcodeRepository for WriteFailingRepository {
    async fn insert(&self, _barcode: NewBarcode) -> Result<BarcodeRecord, BarcodeRepositoryError> {
        Err(BarcodeRepositoryError::connection("connection refused"))
    }

    async fn list_for_owner(
        &self,
        _owner: &UserId,
    ) -> Result<Vec<BarcodeRecord>, BarcodeRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: &Uuid,
    ) -> Result<Option<BarcodeRecord>, BarcodeRepositoryError> {
        Ok(None)
    }

    async fn delete_by_id(&self, _id: &Uuid) -> Result<bool, BarcodeRepositoryError> {
        Err(BarcodeRepositoryError::connection("connection refused"))
    }
}

fn outage_state() -> HttpState {
    let username = Username::new(USERNAME).expect("fixture username");
    HttpState::new(
        Arc::new(InMemoryLoginService::new(username, PASSWORD)),
        BarcodeLifecycle::new(Arc::new(WriteFailingRepository)),
        Arc::new(SvgBarcodeRenderer::new()),
    )
}

#[actix_web::test]
async fn failed_save_is_a_server_error_and_leaves_no_record() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(outage_state()))
            .wrap(SessionGate)
            .wrap(session_middleware(Key::generate(), false))
            .configure(configure_routes),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": USERNAME, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/barcodes")
            .cookie(cookie.clone())
            .set_json(json!({ "payload": "12345", "symbology": "CODE128" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "store_failure");
    let message = body["message"].as_str().expect("message string");
    assert!(
        !message.contains("connection refused"),
        "internal detail leaked: {message}"
    );

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/barcodes")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!([]), "failed save must not produce a record");
}
