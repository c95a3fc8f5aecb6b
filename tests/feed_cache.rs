#![cfg(feature = "inmem-store")]

use actix_web::{test, web, App};
use quill::cache::{PageCache, INDEX_TTL};
use quill::repo::inmem::InMemRepo;
use quill::routes::{config, not_found, AppState};
use serial_test::serial;
use std::sync::Arc;

fn setup_env() {
    std::env::set_var("JWT_SECRET", "test-secret-must-be-32-bytes-long!!");
    std::env::set_var("BOOTSTRAP_ADMIN_USERS", "admin");
    let tmp = tempfile::tempdir().unwrap();
    std::env::set_var("QUILL_DATA_DIR", tmp.path().to_str().unwrap());
}

macro_rules! login {
    ($app:expr, $name:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(&serde_json::json!({ "username": $name }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert!(resp.status().is_success());
        let v: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        v["token"].as_str().unwrap().to_string()
    }};
}

macro_rules! create_post {
    ($app:expr, $token:expr, $text:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .set_json(&serde_json::json!({ "text": $text, "group_id": null }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), 201);
    }};
}

macro_rules! read_index {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service($app, req).await;
        assert!(resp.status().is_success());
        test::read_body(resp).await.to_vec()
    }};
}

#[actix_web::test]
#[serial]
async fn index_replays_stale_bytes_until_cleared() {
    setup_env();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState {
                repo: Arc::new(InMemRepo::new()),
                page_cache: PageCache::new(INDEX_TTL),
            }))
            .configure(config)
            .default_service(web::route().to(not_found)),
    )
    .await;

    let alice = login!(&app, "alice");
    let admin = login!(&app, "admin");
    create_post!(&app, alice, "first");

    let before = read_index!(&app, "/api/v1/posts");

    // a new post lands while the entry is still fresh
    create_post!(&app, alice, "second");

    // identical key within the TTL: byte-identical replay, deliberately stale
    let stale = read_index!(&app, "/api/v1/posts");
    assert_eq!(before, stale);
    let v: serde_json::Value = serde_json::from_slice(&stale).unwrap();
    assert_eq!(v["page_obj"]["items"].as_array().unwrap().len(), 1);

    // a different query string is a different cache entry and sees both posts
    let other_key = read_index!(&app, "/api/v1/posts?page=1");
    let v: serde_json::Value = serde_json::from_slice(&other_key).unwrap();
    assert_eq!(v["page_obj"]["items"].as_array().unwrap().len(), 2);

    // operator flush: the next read recomputes
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/cache/clear")
        .insert_header(("Authorization", format!("Bearer {admin}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let fresh = read_index!(&app, "/api/v1/posts");
    assert_ne!(before, fresh);
    let v: serde_json::Value = serde_json::from_slice(&fresh).unwrap();
    let items = v["page_obj"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["text"], "second");
}

#[actix_web::test]
#[serial]
async fn cache_clear_is_admin_only() {
    setup_env();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState {
                repo: Arc::new(InMemRepo::new()),
                page_cache: PageCache::new(INDEX_TTL),
            }))
            .configure(config)
            .default_service(web::route().to(not_found)),
    )
    .await;

    let alice = login!(&app, "alice");
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/cache/clear")
        .insert_header(("Authorization", format!("Bearer {alice}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // and unauthenticated callers are sent to login
    let req = test::TestRequest::post().uri("/api/v1/admin/cache/clear").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    let location = resp.headers().get("Location").unwrap().to_str().unwrap();
    assert!(location.starts_with("/auth/login?next="));
}
