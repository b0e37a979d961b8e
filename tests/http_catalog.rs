//! HTTP round-trips for [`HttpCatalog`] against an in-process backend.
//!
//! Each test spins up a `tiny_http` server on an ephemeral port in a
//! background thread, serving canned JSON for the backend's REST contract.
//! This exercises the real wire path: bearer header, JSON bodies, and the
//! status-to-error mapping.

use std::io::Read;

use libroteca::{BookDraft, CatalogApi, CatalogError, HttpCatalog, Role};
use tiny_http::{Header, Method, Response, Server};

const TOKEN: &str = "tok-1";

fn route(method: &Method, url: &str, body: &str, authorized: bool) -> (u16, String) {
    match (method, url) {
        (Method::Post, "/api/login") => {
            let creds: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
            if creds["username"] == "admin" && creds["password"] == "admin123" {
                (200, format!(r#"{{"token":"{TOKEN}","role":"admin"}}"#))
            } else {
                (401, r#"{"error":"bad credentials"}"#.to_string())
            }
        }
        _ if !authorized => (401, "{}".to_string()),
        (Method::Get, "/api/books") => (
            200,
            concat!(
                r#"[{"id":1,"title":"Dune","author":"Frank Herbert","created_at":"2024-01-02T03:04:05Z"},"#,
                r#"{"id":2,"title":"Old Record","author":"Anonymous"}]"#
            )
            .to_string(),
        ),
        (Method::Post, "/api/books") => {
            let draft: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
            (
                201,
                format!(
                    r#"{{"id":3,"title":{},"author":{},"created_at":"2024-05-06T07:08:09Z"}}"#,
                    draft["title"], draft["author"]
                ),
            )
        }
        (Method::Put, "/api/books/1") => {
            let draft: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
            (
                200,
                format!(r#"{{"id":1,"title":{},"author":{}}}"#, draft["title"], draft["author"]),
            )
        }
        (Method::Put, "/api/books/500") => (500, "{}".to_string()),
        (Method::Delete, "/api/books/1") => (204, String::new()),
        (Method::Delete, "/api/books/9") => (404, "{}".to_string()),
        _ => (500, "{}".to_string()),
    }
}

/// Starts the canned backend and returns its base URL.
fn spawn_backend() -> String {
    let server = Server::http("127.0.0.1:0").expect("bind test server");
    let port = server.server_addr().to_ip().expect("tcp listener").port();

    std::thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);

            let authorized = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .is_some_and(|h| h.value.as_str() == format!("Bearer {TOKEN}"));

            let (status, payload) = route(request.method(), request.url(), &body, authorized);
            let response = Response::from_string(payload)
                .with_status_code(status)
                .with_header(
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("static header"),
                );
            let _ = request.respond(response);
        }
    });

    format!("http://127.0.0.1:{port}/api")
}

fn draft(title: &str, author: &str) -> BookDraft {
    BookDraft {
        title: title.to_string(),
        author: author.to_string(),
        editing: None,
    }
}

#[tokio::test]
async fn login_then_authorized_list_round_trips() {
    let api = HttpCatalog::new(spawn_backend());

    let session = api.login("admin", "admin123").await.expect("login");
    assert_eq!(session.token, TOKEN);
    assert_eq!(session.role, Role::Admin);

    let books = api.list_books(&session.token).await.expect("list");
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Dune");
    assert!(books[0].created_at.is_some());
    // Legacy record without created_at decodes fine.
    assert_eq!(books[1].created_at, None);
}

#[tokio::test]
async fn bad_credentials_map_to_credentials_error() {
    let api = HttpCatalog::new(spawn_backend());
    let err = api.login("admin", "nope").await.unwrap_err();
    assert!(matches!(err, CatalogError::Credentials));
}

#[tokio::test]
async fn rejected_token_maps_to_session_expired() {
    let api = HttpCatalog::new(spawn_backend());
    let err = api.list_books("stale-token").await.unwrap_err();
    assert!(matches!(err, CatalogError::SessionExpired));
}

#[tokio::test]
async fn create_sends_the_draft_and_decodes_the_record() {
    let api = HttpCatalog::new(spawn_backend());
    let created = api
        .create_book(TOKEN, &draft("Neuromancer", "William Gibson"))
        .await
        .expect("create");
    assert_eq!(created.id, 3);
    assert_eq!(created.title, "Neuromancer");
    assert!(created.created_at.is_some());
}

#[tokio::test]
async fn update_and_delete_follow_the_contract() {
    let api = HttpCatalog::new(spawn_backend());

    let updated = api
        .update_book(TOKEN, 1, &draft("Dune", "F. Herbert"))
        .await
        .expect("update");
    assert_eq!(updated.author, "F. Herbert");

    // 204 with an empty body is a success.
    api.delete_book(TOKEN, 1).await.expect("delete");
}

#[tokio::test]
async fn missing_target_maps_to_not_found() {
    let api = HttpCatalog::new(spawn_backend());
    let err = api.delete_book(TOKEN, 9).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound));
}

#[tokio::test]
async fn server_error_maps_to_network() {
    let api = HttpCatalog::new(spawn_backend());
    let err = api
        .update_book(TOKEN, 500, &draft("T", "A"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Network(_)));
}
