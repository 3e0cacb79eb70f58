//! End-to-end checks against a live HTTP server speaking the backend's
//! dialect: SSE framing, chunked delivery, multipart upload, error statuses.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use futures_util::StreamExt;
use serde_json::json;
use tokio::sync::mpsc;

use sonja_client::{ApiError, EmojiTable, SonjaClient, DEFAULT_EMOJI};
use sonja_core::{AgendaUpdate, NewsItem, NewsTask, SonjaConfig};

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> SonjaClient {
    let mut config = SonjaConfig::default();
    config.api.base_url = format!("http://{}", addr);
    SonjaClient::new(&config).unwrap()
}

fn sse_bytes(frames: &[(&str, &str)]) -> String {
    frames
        .iter()
        .map(|(event, data)| format!("event: {}\ndata: {}\n\n", event, data))
        .collect()
}

fn sse_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
}

/// SSE response delivered in fixed chunks with short pauses, so the client
/// sees the byte boundaries chosen by the test.
fn chunked_sse_response(chunks: Vec<Vec<u8>>) -> Response {
    let stream = futures_util::stream::iter(chunks).then(|chunk| async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok::<_, Infallible>(Bytes::from(chunk))
    });
    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(stream),
    )
        .into_response()
}

#[tokio::test]
async fn chat_stream_delivers_steps_then_response() {
    let app = Router::new().route(
        "/chat/stream",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["message"], "Wie zijn onze concurrenten?");
            assert!(body["context"].as_str().unwrap().starts_with("Gebruiker:"));
            sse_response(sse_bytes(&[
                (
                    "step",
                    r#"{"tool":"web_search","summary":"concurrenten gezocht"}"#,
                ),
                ("step", r#"{"tool":"write_to_memory"}"#),
                ("done", r#"{"response":"Klaar!"}"#),
            ]))
        }),
    );
    let client = client_for(serve(app).await);

    let (tx, mut rx) = mpsc::channel(16);
    let outcome = client
        .chat_stream(
            "Wie zijn onze concurrenten?",
            "Gebruiker: hoi\n\nSonja: Hoi! Waarmee kan ik je helpen?",
            tx,
        )
        .await
        .unwrap();

    // both deliveries already completed when the call resolved
    let first = rx.try_recv().unwrap();
    let second = rx.try_recv().unwrap();
    assert!(rx.try_recv().is_err());
    assert_eq!(first.tool, "web_search");
    assert_eq!(second.tool, "write_to_memory");

    assert_eq!(outcome.response, "Klaar!");
    assert_eq!(outcome.steps.len(), 2);

    let annotated = EmojiTable::default().annotate_all(outcome.steps);
    assert_eq!(annotated[0].emoji, "🔎");
    assert_eq!(annotated[1].emoji, "💾");
}

#[tokio::test]
async fn stream_survives_utf8_chunk_splits() {
    let frame = "event: step\n\
        data: {\"tool\":\"Read website content\",\"summary\":\"🚀 site élégant\"}\n\
        \n\
        event: done\n\
        data: {\"response\":\"Analyse afgerond ✅\"}\n\
        \n";
    let bytes = frame.as_bytes();
    let cut_a = frame.find('🚀').unwrap() + 2; // inside the rocket
    let cut_b = frame.find('✅').unwrap() + 1; // inside the check mark
    assert!(!frame.is_char_boundary(cut_a));
    assert!(!frame.is_char_boundary(cut_b));
    let chunks = vec![
        bytes[..cut_a].to_vec(),
        bytes[cut_a..cut_b].to_vec(),
        bytes[cut_b..].to_vec(),
    ];

    let app = Router::new().route(
        "/analyze/website/stream",
        post(move |_body: Json<serde_json::Value>| {
            let chunks = chunks.clone();
            async move { chunked_sse_response(chunks) }
        }),
    );
    let client = client_for(serve(app).await);

    let (tx, mut rx) = mpsc::channel(4);
    let outcome = client
        .analyze_website_stream("https://afas.nl", None, tx)
        .await
        .unwrap();

    assert_eq!(rx.try_recv().unwrap().tool, "Read website content");
    assert_eq!(outcome.steps[0].summary.as_deref(), Some("🚀 site élégant"));
    assert_eq!(outcome.response, "Analyse afgerond ✅");
}

#[tokio::test]
async fn malformed_frames_do_not_break_the_stream() {
    let app = Router::new().route(
        "/analyze/competitors/stream",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["competitor_names"][0], "Exact");
            assert!(body["custom_prompt"].is_null());
            sse_response(sse_bytes(&[
                ("step", r#"{"tool":"spy_competitor_research"}"#),
                ("step", r#"{"tool": broken json"#),
                ("step", r#"{"tool":"rag_search"}"#),
                ("done", r#"{"response":"Analyse staat in je geheugen."}"#),
            ]))
        }),
    );
    let client = client_for(serve(app).await);

    let (tx, mut rx) = mpsc::channel(8);
    let outcome = client
        .analyze_competitors_stream(&["Exact".to_string()], None, tx)
        .await
        .unwrap();

    assert_eq!(outcome.steps.len(), 2);
    assert_eq!(outcome.response, "Analyse staat in je geheugen.");
    assert_eq!(rx.try_recv().unwrap().tool, "spy_competitor_research");
    assert_eq!(rx.try_recv().unwrap().tool, "rag_search");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn stream_without_done_resolves_empty() {
    let app = Router::new().route(
        "/meetings/extract/stream",
        post(|_body: Json<serde_json::Value>| async {
            sse_response(sse_bytes(&[(
                "step",
                r#"{"tool":"write_to_memory","summary":"actiepunten opgeslagen"}"#,
            )]))
        }),
    );
    let client = client_for(serve(app).await);

    let (tx, mut rx) = mpsc::channel(4);
    let outcome = client
        .extract_meeting_stream("Jan: we moeten de campagne af hebben", None, tx)
        .await
        .unwrap();

    assert_eq!(outcome.response, "");
    assert_eq!(outcome.steps.len(), 1);
    assert_eq!(rx.try_recv().unwrap().tool, "write_to_memory");
}

#[tokio::test]
async fn non_2xx_is_a_hard_error() {
    let app = Router::new().route(
        "/chat/stream",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "agent exploded") }),
    );
    let client = client_for(serve(app).await);

    let (tx, _rx) = mpsc::channel(4);
    let err = client.chat_stream("hoi", "", tx).await.unwrap_err();
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("exploded"));
        }
        other => panic!("unexpected error: {other}"),
    }

    // unknown path on the blocking sibling: same hard-error contract
    let err = client.chat("hoi", "").await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 404, .. }));
}

#[tokio::test]
async fn news_generation_surfaces_content() {
    let app = Router::new()
        .route(
            "/news/generate/stream",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["task"], "inhaker");
                assert_eq!(body["news_item"]["source"], "nu.nl");
                sse_response(sse_bytes(&[
                    ("step", r#"{"tool":"web_search"}"#),
                    ("done", r#"{"content":"Inhaker: softwarekoppen bij elkaar"}"#),
                ]))
            }),
        )
        .route(
            "/news/generate",
            post(|_body: Json<serde_json::Value>| async {
                Json(json!({ "content": "LinkedIn-post over het nieuws" }))
            }),
        );
    let client = client_for(serve(app).await);
    let item = NewsItem {
        title: "Softwaremarkt groeit".to_string(),
        url: "https://nu.nl/artikel".to_string(),
        summary: "De markt groeit hard.".to_string(),
        source: "nu.nl".to_string(),
        published_at: "2025-01-06T08:00:00Z".to_string(),
        image_url: None,
    };

    let (tx, _rx) = mpsc::channel(4);
    let outcome = client
        .generate_news_stream(&item, NewsTask::Inhaker, None, tx)
        .await
        .unwrap();
    assert_eq!(outcome.response, "Inhaker: softwarekoppen bij elkaar");

    let content = client
        .generate_news(&item, NewsTask::Linkedin, None)
        .await
        .unwrap();
    assert_eq!(content, "LinkedIn-post over het nieuws");
}

#[tokio::test]
async fn health_round_trip() {
    let app = Router::new().route("/health", get(|| async { Json(json!({"status": "ok"})) }));
    let client = client_for(serve(app).await);
    client.health().await.unwrap();
}

type CompetitorStore = Arc<Mutex<Vec<(String, String)>>>;

async fn competitors_list(State(store): State<CompetitorStore>) -> Json<serde_json::Value> {
    let rows = store.lock().unwrap();
    let competitors: Vec<_> = rows
        .iter()
        .map(|(id, name)| json!({ "id": id, "name": name, "enabled": true }))
        .collect();
    Json(json!({ "competitors": competitors }))
}

async fn competitors_create(
    State(store): State<CompetitorStore>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let mut rows = store.lock().unwrap();
    let id = format!("c{}", rows.len() + 1);
    let name = body["name"].as_str().unwrap().to_string();
    rows.push((id.clone(), name.clone()));
    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "name": name, "enabled": true })),
    )
}

async fn competitors_rename(
    State(store): State<CompetitorStore>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let mut rows = store.lock().unwrap();
    let row = rows.iter_mut().find(|(rid, _)| *rid == id).unwrap();
    row.1 = body["name"].as_str().unwrap().to_string();
    Json(json!({ "id": row.0, "name": row.1, "enabled": true }))
}

async fn competitors_remove(
    State(store): State<CompetitorStore>,
    Path(id): Path<String>,
) -> StatusCode {
    store.lock().unwrap().retain(|(rid, _)| *rid != id);
    StatusCode::NO_CONTENT
}

#[tokio::test]
async fn competitor_crud_round_trip() {
    let store: CompetitorStore = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/competitors", get(competitors_list).post(competitors_create))
        .route(
            "/competitors/{id}",
            patch(competitors_rename).delete(competitors_remove),
        )
        .with_state(store);
    let client = client_for(serve(app).await);

    let added = client.competitor_add("Exact").await.unwrap();
    assert_eq!(added.name, "Exact");
    assert!(added.enabled);

    let renamed = client.competitor_rename(&added.id, "Exact Online").await.unwrap();
    assert_eq!(renamed.name, "Exact Online");

    let all = client.competitors_list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Exact Online");

    client.competitor_delete(&added.id).await.unwrap();
    assert!(client.competitors_list().await.unwrap().is_empty());
}

#[tokio::test]
async fn agenda_update_sends_only_set_fields() {
    let app = Router::new().route(
        "/agenda/{id}",
        put(
            |Path(id): Path<String>, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body, json!({ "title": "Weekrapport vrijdag" }));
                Json(json!({
                    "id": id,
                    "title": "Weekrapport vrijdag",
                    "prompt": "Schrijf het weekrapport",
                    "type": "recurring",
                    "schedule": "0 16 * * 5",
                    "created_at": "2025-01-06T09:00:00Z",
                }))
            },
        ),
    );
    let client = client_for(serve(app).await);

    let update = AgendaUpdate {
        title: Some("Weekrapport vrijdag".to_string()),
        ..Default::default()
    };
    let item = client.agenda_update("a1", &update).await.unwrap();
    assert_eq!(item.title, "Weekrapport vrijdag");
    assert_eq!(item.schedule, "0 16 * * 5");
}

#[tokio::test]
async fn knowledge_names_and_uploads_round_trip() {
    let app = Router::new()
        .route(
            "/knowledge/{name}",
            get(|Path(name): Path<String>| async move {
                assert_eq!(name, "plan 2025.md");
                Json(json!({ "content": "# Plan\nGroeien." }))
            }),
        )
        .route(
            "/knowledge/upload",
            post(|mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                assert_eq!(field.name(), Some("file"));
                let name = field.file_name().unwrap().to_string();
                let data = field.bytes().await.unwrap();
                assert_eq!(&data[..], b"# Notities\n");
                Json(json!({ "status": "ok", "filename": name }))
            }),
        );
    let client = client_for(serve(app).await);

    let content = client.knowledge_content("plan 2025.md").await.unwrap();
    assert_eq!(content, "# Plan\nGroeien.");

    let stored = client
        .knowledge_upload("notities.md", b"# Notities\n".to_vec())
        .await
        .unwrap();
    assert_eq!(stored, "notities.md");
}

#[tokio::test]
async fn memory_edit_round_trips_content() {
    let app = Router::new()
        .route(
            "/memory",
            get(|| async { Json(json!({ "files": ["klant voorkeuren.md"] })) }),
        )
        .route(
            "/memory/{name}",
            put(
                |Path(name): Path<String>, Json(body): Json<serde_json::Value>| async move {
                    assert_eq!(name, "klant voorkeuren.md");
                    assert_eq!(body, json!({ "content": "Klant wil korte posts." }));
                    Json(json!({ "status": "ok" }))
                },
            ),
        );
    let client = client_for(serve(app).await);

    let files = client.memory_list().await.unwrap();
    assert_eq!(files, ["klant voorkeuren.md"]);

    client
        .memory_update("klant voorkeuren.md", "Klant wil korte posts.")
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_tools_still_render_with_fallback() {
    let app = Router::new().route(
        "/chat/stream",
        post(|| async {
            sse_response(sse_bytes(&[
                ("step", r#"{"tool":"fresh_new_tool"}"#),
                ("done", r#"{"response":"ok"}"#),
            ]))
        }),
    );
    let client = client_for(serve(app).await);

    let (tx, _rx) = mpsc::channel(4);
    let outcome = client.chat_stream("hoi", "", tx).await.unwrap();
    let annotated = EmojiTable::default().annotate_all(outcome.steps);
    assert_eq!(annotated[0].emoji, DEFAULT_EMOJI);
}
