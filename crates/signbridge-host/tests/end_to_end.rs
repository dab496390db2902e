//! End-to-end runs: simulated browser + real HTTP client + mock backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use signbridge_core::BridgeConfig;
use signbridge_host::{Extension, SimulatedBrowser};
use signbridge_inspector::{PageSnapshot, SourceElement, VideoElement};
use signbridge_popup::{HttpBackend, MemoryDisplay, TranslationStatus, Trigger};

#[derive(Clone)]
struct MockBackend {
    hits: Arc<AtomicUsize>,
    reply: Arc<dyn Fn(&Value) -> Response + Send + Sync>,
}

async fn translate(State(mock): State<MockBackend>, Json(body): Json<Value>) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    (mock.reply)(&body)
}

async fn spawn_backend<F>(reply: F) -> (String, Arc<AtomicUsize>)
where
    F: Fn(&Value) -> Response + Send + Sync + 'static,
{
    let hits = Arc::new(AtomicUsize::new(0));
    let state = MockBackend {
        hits: hits.clone(),
        reply: Arc::new(reply),
    };
    let router = Router::new()
        .route("/translate/", post(translate))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), hits)
}

async fn installed(backend_url: String, page: PageSnapshot) -> (Extension, Arc<MemoryDisplay>) {
    let backend = HttpBackend::new(&BridgeConfig {
        backend_url,
        ..Default::default()
    })
    .unwrap();
    let display = Arc::new(MemoryDisplay::new());
    let browser = Arc::new(SimulatedBrowser::new());
    browser.open_tab(page);

    let extension = Extension::install(browser, Arc::new(backend), display.clone());
    extension.click_icon().await.unwrap();
    (extension, display)
}

fn page_with(video: VideoElement) -> PageSnapshot {
    PageSnapshot::new("https://example.com/watch").with_video(video)
}

#[tokio::test]
async fn test_hello_world_translation() {
    let (url, hits) = spawn_backend(|body| {
        assert_eq!(body, &json!({ "video_url": "https://x/a.mp4" }));
        Json(json!({ "message": "Translation successful", "translation": "HELLO WORLD" }))
            .into_response()
    })
    .await;
    let (ext, display) = installed(url, page_with(VideoElement::with_src("https://x/a.mp4"))).await;

    let outcome = ext.start_translation().await;
    assert_eq!(
        outcome,
        Trigger::Completed(TranslationStatus::TranslationReceived("HELLO WORLD".into()))
    );
    assert!(display.last().unwrap().message.contains("HELLO WORLD"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_nested_source_is_sent() {
    let (url, hits) = spawn_backend(|body| {
        Json(json!({ "translation": body["video_url"].as_str().unwrap_or_default() }))
            .into_response()
    })
    .await;
    let video = VideoElement {
        sources: vec![SourceElement {
            src: Some("https://cdn.example.com/clip.webm".into()),
            media_type: Some("video/webm".into()),
        }],
        ..Default::default()
    };
    let (ext, _) = installed(url, page_with(video)).await;

    assert_eq!(
        ext.start_translation().await,
        Trigger::Completed(TranslationStatus::TranslationReceived(
            "https://cdn.example.com/clip.webm".into()
        ))
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_page_without_video_makes_no_request() {
    let (url, hits) = spawn_backend(|_| Json(json!({ "translation": "X" })).into_response()).await;
    let (ext, display) = installed(url, PageSnapshot::new("https://example.com")).await;

    assert_eq!(
        ext.start_translation().await,
        Trigger::Completed(TranslationStatus::VideoError)
    );
    assert_eq!(display.last().unwrap().message, "No video found");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_backend_500() {
    let (url, hits) = spawn_backend(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Translation script error" })),
        )
            .into_response()
    })
    .await;
    let (ext, display) = installed(url, page_with(VideoElement::with_src("https://x/a.mp4"))).await;

    assert_eq!(
        ext.start_translation().await,
        Trigger::Completed(TranslationStatus::BackendError)
    );
    assert_eq!(display.last().unwrap().message, "Error connecting to backend!");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_backend_without_translation() {
    let (url, _) = spawn_backend(|_| Json(json!({ "message": "ok" })).into_response()).await;
    let (ext, display) = installed(url, page_with(VideoElement::with_src("https://x/a.mp4"))).await;

    assert_eq!(
        ext.start_translation().await,
        Trigger::Completed(TranslationStatus::TranslationError)
    );
    assert_eq!(display.last().unwrap().message, "Error in translation!");
}

#[tokio::test]
async fn test_backend_down() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let (ext, display) = installed(
        format!("http://127.0.0.1:{}", port),
        page_with(VideoElement::with_src("https://x/a.mp4")),
    )
    .await;

    assert_eq!(
        ext.start_translation().await,
        Trigger::Completed(TranslationStatus::BackendError)
    );
    let statuses = display.statuses();
    assert!(statuses.contains(&TranslationStatus::BackendPending));
    assert!(!statuses.iter().any(|s| s.is_success()));
}
