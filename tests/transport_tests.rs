//! ReqwestClient against an in-process HTTP server

mod common;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post, put},
};
use common::{ENTITY_SET_ID, ORGANIZATION_ID, SYNC_ID, TOKEN, init_tracing};
use lattice::prelude::*;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// What the server saw for one request
#[derive(Debug, Clone)]
struct Captured {
    authorization: Option<String>,
    content_type: Option<String>,
    body: String,
}

type Captures = Arc<Mutex<Vec<Captured>>>;

fn capture(captures: &Captures, headers: &HeaderMap, body: &Bytes) {
    let value_of = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    captures.lock().unwrap().push(Captured {
        authorization: value_of(header::AUTHORIZATION),
        content_type: value_of(header::CONTENT_TYPE),
        body: String::from_utf8_lossy(body).into_owned(),
    });
}

async fn update_title(
    State(captures): State<Captures>,
    Path(_organization_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    capture(&captures, &headers, &body);
    StatusCode::OK
}

async fn get_acl(State(captures): State<Captures>, headers: HeaderMap, body: Bytes) -> Json<Value> {
    capture(&captures, &headers, &body);
    Json(json!({ "aclKey": [ENTITY_SET_ID], "aces": [] }))
}

async fn entity_set_size(Path(_entity_set_id): Path<String>) -> &'static str {
    "7"
}

async fn acquire_ticket() -> (StatusCode, &'static str) {
    (StatusCode::FORBIDDEN, "no write access")
}

async fn create_organization() -> &'static str {
    ORGANIZATION_ID
}

async fn get_user(Path(user_id): Path<String>) -> Json<Value> {
    Json(json!({ "id": user_id }))
}

async fn spawn_server() -> (SocketAddr, Captures) {
    init_tracing();
    let captures = Captures::default();
    let app = Router::new()
        .route("/datastore/organizations", post(create_organization))
        .route("/datastore/organizations/{id}/title", put(update_title))
        .route("/datastore/permissions", post(get_acl))
        .route("/datastore/data/entitydata/{id}/count", get(entity_set_size))
        .route("/datastore/data/ticket/{id}/{sync}", post(acquire_ticket))
        .route("/datastore/principals/users/{id}", get(get_user))
        .with_state(captures.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, captures)
}

fn client_for(addr: SocketAddr) -> LatticeClient {
    let config = Configuration::new(&format!("http://{addr}"))
        .unwrap()
        .with_auth_token(TOKEN);
    LatticeClient::new(config).unwrap()
}

#[tokio::test]
async fn test_json_request_carries_bearer_token() -> anyhow::Result<()> {
    let (addr, captures) = spawn_server().await;
    let client = client_for(addr);

    let acl = client.permissions().get_acl(&[ENTITY_SET_ID]).await?;
    assert_eq!(acl.acl_key.len(), 1);

    let captured = captures.lock().unwrap()[0].clone();
    assert_eq!(captured.authorization, Some(format!("Bearer {TOKEN}")));
    assert_eq!(captured.content_type.as_deref(), Some("application/json"));
    assert_eq!(captured.body, format!("[\"{ENTITY_SET_ID}\"]"));
    Ok(())
}

#[tokio::test]
async fn test_text_body_is_sent_as_plain_text() -> anyhow::Result<()> {
    let (addr, captures) = spawn_server().await;
    let client = client_for(addr);

    client
        .organizations()
        .update_title(ORGANIZATION_ID, "Renamed")
        .await?;

    let captured = captures.lock().unwrap()[0].clone();
    assert_eq!(captured.content_type.as_deref(), Some("text/plain"));
    assert_eq!(captured.body, "Renamed");
    Ok(())
}

#[tokio::test]
async fn test_plain_number_body_is_decoded() {
    let (addr, _) = spawn_server().await;
    let size = client_for(addr)
        .data()
        .get_entity_set_size(ENTITY_SET_ID)
        .await
        .unwrap();
    assert_eq!(size, 7);
}

#[tokio::test]
async fn test_rejection_maps_to_http_error() {
    let (addr, _) = spawn_server().await;
    let err = client_for(addr)
        .data()
        .acquire_sync_ticket(ENTITY_SET_ID, SYNC_ID)
        .await
        .unwrap_err();

    match err {
        LatticeError::Http { api, status, body } => {
            assert_eq!(api, ApiName::Data);
            assert_eq!(status, 403);
            assert_eq!(body, "no write access");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_path_segments_are_percent_encoded() {
    let (addr, _) = spawn_server().await;
    let user = client_for(addr)
        .users()
        .get_user("jane doe#1")
        .await
        .unwrap();
    assert_eq!(user["id"], json!("jane doe#1"));
}

#[tokio::test]
async fn test_slashes_in_an_id_stay_in_one_segment() {
    let (addr, _) = spawn_server().await;
    let user_id = "auth0|abc/../../organizations";
    let user = client_for(addr).users().get_user(user_id).await.unwrap();
    assert_eq!(user["id"], json!(user_id));
}

#[tokio::test]
async fn test_dot_segment_is_refused_before_sending() {
    let (addr, _) = spawn_server().await;
    let err = client_for(addr).users().get_user("..").await.unwrap_err();
    assert!(matches!(err, LatticeError::InvalidParameter(_)));
}

#[tokio::test]
async fn test_plain_text_id_starting_with_a_digit() -> anyhow::Result<()> {
    let (addr, _) = spawn_server().await;
    let organization = Organization::builder()
        .set_title("Digits first")?
        .set_principal(
            Principal::builder()
                .set_type(PrincipalType::Organization)
                .set_id("digits")?
                .build()?,
        )
        .build()?;

    let id = client_for(addr)
        .organizations()
        .create_organization(&organization)
        .await?;
    assert_eq!(id.to_string(), ORGANIZATION_ID);
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (addr, _) = spawn_server().await;
    let err = client_for(addr)
        .edm()
        .get_all_entity_types()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_connection_failure_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr)
        .data()
        .get_entity_set_size(ENTITY_SET_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, LatticeError::Transport(_)));
    assert!(!err.is_local());
}
