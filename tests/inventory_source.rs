//! Fetching inventory over HTTP from a local file server.

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse, HttpServer};
use reqwest::Url;
use serde_json::{json, Value};
use storefront_service::domain::errors::DomainError;
use storefront_service::domain::ports::InventorySource;
use storefront_service::handlers;
use storefront_service::infrastructure::inventory_source::HttpInventorySource;
use storefront_service::infrastructure::memory_store::MemoryStore;
use storefront_service::AppState;

const BUNDLED_INVENTORY: &str = include_str!("../data/estoque.json");
const STORED: &str = r#"[{"preco":1.0,"peso":1.0,"dias_entrega":1,"quantidade":1}]"#;

/// Serve `/estoque.json` and a broken `/quebrado.json` on a free local port.
fn serve_files() -> (ServerHandle, Url) {
    let server = HttpServer::new(|| {
        App::new()
            .route(
                "/estoque.json",
                web::get().to(|| async {
                    HttpResponse::Ok()
                        .content_type("application/json")
                        .body(BUNDLED_INVENTORY)
                }),
            )
            .route(
                "/quebrado.json",
                web::get().to(|| async { HttpResponse::Ok().body("[{") }),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind failed");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let base = Url::parse(&format!("http://{addr}/")).expect("valid base url");
    (handle, base)
}

fn state(base: Url) -> web::Data<AppState> {
    let state = web::Data::new(AppState::new(
        MemoryStore::new(),
        MemoryStore::new(),
        HttpInventorySource::new(Some(base)),
        "estoque.json",
    ));
    state
        .storefront
        .replace_inventory(STORED)
        .expect("seed inventory");
    state
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(handlers::configure),
        )
        .await
    };
}

fn load(path: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/inventory/load")
        .set_json(json!({ "path": path }))
}

fn stored_len(state: &web::Data<AppState>) -> Option<usize> {
    state.storefront.inventory().unwrap().map(|i| i.len())
}

#[actix_web::test]
async fn loads_bundled_inventory_by_relative_path() {
    let (handle, base) = serve_files();
    let state = state(base);
    let app = app!(state);

    let body: Value = test::call_and_read_body_json(&app, load("estoque.json").to_request()).await;

    assert_eq!(body.as_array().map(Vec::len), Some(4));
    assert_eq!(body[0]["nome"], "Semente de milho (saco 20kg)");
    let stored = serde_json::to_value(state.storefront.inventory().unwrap()).unwrap();
    assert_eq!(stored, body);

    handle.stop(true).await;
}

#[actix_web::test]
async fn missing_file_reports_status_and_keeps_inventory() {
    let (handle, base) = serve_files();
    let state = state(base);
    let app = app!(state);

    let resp = test::call_service(&app, load("nao-existe.json").to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to load inventory file: 404");
    assert_eq!(stored_len(&state), Some(1));

    handle.stop(true).await;
}

#[actix_web::test]
async fn unparseable_file_is_rejected_and_keeps_inventory() {
    let (handle, base) = serve_files();
    let state = state(base);
    let app = app!(state);

    let resp = test::call_service(&app, load("quebrado.json").to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stored_len(&state), Some(1));

    handle.stop(true).await;
}

#[actix_web::test]
async fn empty_body_uses_configured_default_path() {
    let (handle, base) = serve_files();
    let state = state(base);
    let app = app!(state);

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/inventory/load").to_request(),
    )
    .await;

    assert_eq!(body.as_array().map(Vec::len), Some(4));
    assert_eq!(stored_len(&state), Some(4));

    handle.stop(true).await;
}

#[actix_web::test]
async fn malformed_body_does_not_fall_back_to_default_path() {
    let (handle, base) = serve_files();
    let state = state(base);
    let app = app!(state);

    for payload in ["{", r#"{"path": 5}"#] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/inventory/load")
                .insert_header(("content-type", "application/json"))
                .set_payload(payload)
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(stored_len(&state), Some(1));

    handle.stop(true).await;
}

#[actix_web::test]
async fn closed_port_is_unreachable() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind failed")
        .local_addr()
        .expect("addr failed")
        .port();
    let source = HttpInventorySource::new(None);

    let err = source
        .fetch(&format!("http://127.0.0.1:{port}/estoque.json"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::SourceUnreachable(_)));
}
