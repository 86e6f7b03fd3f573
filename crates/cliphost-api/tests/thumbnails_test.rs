mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use cliphost_core::models::VideoResponse;
use cliphost_core::StorageBackend;
use cliphost_storage::AssetCache;
use helpers::{setup_test_app, setup_test_app_with, TestAppOptions};
use uuid::Uuid;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake image payload";

fn thumbnail_form(content_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "thumbnail",
        Part::bytes(PNG_BYTES.to_vec())
            .file_name("thumb.png")
            .mime_type(content_type),
    )
}

#[tokio::test]
async fn upload_thumbnail_stores_file_and_links_locator() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .authorization_bearer(app.bearer_token(owner))
        .multipart(thumbnail_form("image/png"))
        .await;

    response.assert_status_ok();
    let body: VideoResponse = response.json();
    let locator = body.thumbnail_url.expect("thumbnail locator must be set");
    assert!(locator.starts_with("/assets/"), "locator: {}", locator);
    assert!(locator.ends_with(".png"), "locator: {}", locator);

    // The payload landed under the asset root under the locator's key.
    let key = locator.strip_prefix("/assets/").unwrap();
    let stored = std::fs::read(app.assets_root.join(key)).unwrap();
    assert_eq!(stored, PNG_BYTES);

    // The record store saw the same locator.
    let persisted = app.videos.get(video.id).await.unwrap();
    assert_eq!(persisted.thumbnail_url.as_deref(), Some(locator.as_str()));
    assert_eq!(persisted.video_url, None);
}

#[tokio::test]
async fn reupload_replaces_previous_locator() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;
    let path = format!("/videos/{}/thumbnail", video.id);

    let first: VideoResponse = app
        .server
        .post(&path)
        .authorization_bearer(app.bearer_token(owner))
        .multipart(thumbnail_form("image/png"))
        .await
        .json();
    let first_locator = first.thumbnail_url.unwrap();

    let second: VideoResponse = app
        .server
        .post(&path)
        .authorization_bearer(app.bearer_token(owner))
        .multipart(thumbnail_form("image/png"))
        .await
        .json();
    let second_locator = second.thumbnail_url.unwrap();

    assert_ne!(first_locator, second_locator);

    // Replace, not append: the record holds only the newest locator.
    let persisted = app.videos.get(video.id).await.unwrap();
    assert_eq!(
        persisted.thumbnail_url.as_deref(),
        Some(second_locator.as_str())
    );
    assert!(!second_locator.contains(&first_locator));
}

#[tokio::test]
async fn inline_backend_embeds_data_uri_and_caches_bytes() {
    let app = setup_test_app_with(TestAppOptions {
        thumbnail_backend: StorageBackend::Inline,
        ..Default::default()
    })
    .await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .authorization_bearer(app.bearer_token(owner))
        .multipart(thumbnail_form("image/png"))
        .await;

    response.assert_status_ok();
    let body: VideoResponse = response.json();
    let locator = body.thumbnail_url.unwrap();
    assert!(locator.starts_with("data:image/png;base64,"));

    // No file was written; the raw bytes live in the asset cache instead.
    assert_eq!(app.stored_file_count(), 0);
    assert_eq!(
        app.cache.get(video.id).as_deref(),
        Some(PNG_BYTES),
        "cache must hold the raw payload keyed by record id"
    );
}

#[tokio::test]
async fn unsupported_content_type_is_rejected_before_any_side_effect() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .authorization_bearer(app.bearer_token(owner))
        .multipart(thumbnail_form("image/gif"))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_MEDIA_TYPE");

    assert_eq!(app.stored_file_count(), 0);
    assert!(app.cache.is_empty());
    let persisted = app.videos.get(video.id).await.unwrap();
    assert_eq!(persisted.thumbnail_url, None);
}

#[tokio::test]
async fn missing_named_field_is_malformed_multipart() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(PNG_BYTES.to_vec())
            .file_name("thumb.png")
            .mime_type("image/png"),
    );

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .authorization_bearer(app.bearer_token(owner))
        .multipart(form)
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "MALFORMED_MULTIPART");
}

#[tokio::test]
async fn empty_payload_is_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let form = MultipartForm::new().add_part(
        "thumbnail",
        Part::bytes(Vec::new())
            .file_name("empty.png")
            .mime_type("image/png"),
    );

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .authorization_bearer(app.bearer_token(owner))
        .multipart(form)
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn missing_bearer_token_is_unauthenticated() {
    let app = setup_test_app().await;
    let video = app.create_video(Uuid::new_v4()).await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .multipart(thumbnail_form("image/png"))
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn non_owner_is_unauthorized_with_zero_side_effects() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .authorization_bearer(app.bearer_token(stranger))
        .multipart(thumbnail_form("image/png"))
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");

    assert_eq!(app.stored_file_count(), 0);
    assert!(app.cache.is_empty());
    let persisted = app.videos.get(video.id).await.unwrap();
    assert_eq!(persisted.thumbnail_url, None);
}

#[tokio::test]
async fn invalid_video_id_is_a_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/videos/not-a-uuid/thumbnail")
        .authorization_bearer(app.bearer_token(Uuid::new_v4()))
        .multipart(thumbnail_form("image/png"))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn unknown_video_id_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", Uuid::new_v4()))
        .authorization_bearer(app.bearer_token(Uuid::new_v4()))
        .multipart(thumbnail_form("image/png"))
        .await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_thumbnail_is_rejected_with_413() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    // Test config caps thumbnails at 1 MiB.
    let form = MultipartForm::new().add_part(
        "thumbnail",
        Part::bytes(vec![0u8; 2 * 1024 * 1024])
            .file_name("huge.png")
            .mime_type("image/png"),
    );

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .authorization_bearer(app.bearer_token(owner))
        .multipart(form)
        .await;

    response.assert_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.stored_file_count(), 0);
}
