//! Integration tests for the Spotify client and mood pipeline over HTTP
//!
//! A local axum server stands in for the Spotify Web API so the real
//! reqwest client, URL construction, and bearer credential are exercised.

use ambient_common::{Mood, MoodResult, Session};
use ambient_dash::services::{compute_mood, MoodError, MusicApi, MusicApiError, SpotifyClient};
use axum::{
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

const GOOD_TOKEN: &str = "good-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", GOOD_TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": {"status": 401, "message": "Invalid access token"}})),
    )
        .into_response()
}

/// GET /v1/me/player/recently-played
///
/// `limit` selects how many of the canned tracks come back.
async fn recently_played(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0);
    let ids = ["happy1", "happy2", "nodata", "sad1"];
    let items: Vec<_> = ids
        .iter()
        .take(limit)
        .map(|id| json!({"track": {"id": id, "name": id}, "played_at": "2026-10-16T10:00:00Z"}))
        .collect();
    Json(json!({"items": items, "limit": limit})).into_response()
}

/// GET /v1/audio-features
async fn audio_features(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let ids = params.get("ids").cloned().unwrap_or_default();
    let features: Vec<_> = ids
        .split(',')
        .map(|id| match id {
            "happy1" => json!({"id": id, "valence": 0.9}),
            "happy2" => json!({"id": id, "valence": 0.8}),
            "sad1" => json!({"id": id, "valence": 0.7}),
            _ => serde_json::Value::Null,
        })
        .collect();
    Json(json!({"audio_features": features})).into_response()
}

/// Start the fake upstream, returning its base URL
async fn spawn_fake_spotify() -> String {
    let app = Router::new()
        .route("/v1/me/player/recently-played", get(recently_played))
        .route("/v1/audio-features", get(audio_features))
        .route(
            "/broken/me/player/recently-played",
            get(|| async { (StatusCode::OK, "not json") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client(base_url: String) -> SpotifyClient {
    SpotifyClient::new(base_url, Duration::from_secs(5)).expect("Should build client")
}

#[tokio::test]
async fn test_recently_played_sends_limit_and_bearer() {
    let base = spawn_fake_spotify().await;
    let client = client(format!("{}/v1", base));

    let items = client.recently_played(GOOD_TOKEN, 2).await.unwrap();
    let ids: Vec<_> = items.iter().filter_map(|i| i.track_id()).collect();
    assert_eq!(ids, vec!["happy1", "happy2"]);
}

#[tokio::test]
async fn test_audio_features_keeps_nulls_in_order() {
    let base = spawn_fake_spotify().await;
    let client = client(format!("{}/v1", base));

    let features = client
        .audio_features(GOOD_TOKEN, "happy1,nodata,sad1")
        .await
        .unwrap();
    assert_eq!(features.len(), 3);
    assert_eq!(features[0].as_ref().map(|f| f.valence), Some(0.9));
    assert!(features[1].is_none());
    assert_eq!(features[2].as_ref().map(|f| f.valence), Some(0.7));
}

#[tokio::test]
async fn test_bad_token_returns_api_error_with_body() {
    let base = spawn_fake_spotify().await;
    let client = client(format!("{}/v1", base));

    let result = client.recently_played("expired", 20).await;
    match result {
        Err(MusicApiError::ApiError { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid access token"));
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let base = spawn_fake_spotify().await;
    let client = client(format!("{}/broken", base));

    let result = client.recently_played(GOOD_TOKEN, 20).await;
    assert!(matches!(result, Err(MusicApiError::ParseError(_))));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{}/v1", addr));
    let result = client.recently_played(GOOD_TOKEN, 20).await;
    assert!(matches!(result, Err(MusicApiError::NetworkError(_))));
}

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let base = spawn_fake_spotify().await;
    let client = client(format!("{}/v1", base));

    // happy1 0.9, happy2 0.8, nodata null, sad1 0.7 → 2.4 / 3 = 0.8
    let result = compute_mood(&client, &Session::with_token(GOOD_TOKEN))
        .await
        .unwrap();
    assert_eq!(result, MoodResult::Classified(Mood::Upbeat));
}

#[tokio::test]
async fn test_pipeline_expired_token_is_upstream_error() {
    let base = spawn_fake_spotify().await;
    let client = client(format!("{}/v1", base));

    let result = compute_mood(&client, &Session::with_token("expired")).await;
    assert!(matches!(
        result,
        Err(MoodError::Upstream {
            context: "history fetch failed",
            status: 401,
            ..
        })
    ));
}

#[tokio::test]
async fn test_pipeline_transport_failure_is_unexpected() {
    let base = spawn_fake_spotify().await;
    let client = client(format!("{}/broken", base));

    let result = compute_mood(&client, &Session::with_token(GOOD_TOKEN)).await;
    assert!(matches!(result, Err(MoodError::Unexpected(_))));
}
