//! End-to-end behaviour of send_json, parse_json and map_json.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use json_negotiate::config::{MissingContentType, NegotiationConfig, UnsupportedBody};
use json_negotiate::http::JSON_CONTENT_TYPE;
use json_negotiate::{map_json, parse_json, respond_json, send_json, PipeError};

mod common;
use common::{body_string, request, run};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Ack {
    ack: bool,
}

#[tokio::test]
async fn test_send_json_success() {
    let pipe = send_json(json!({"success": true}));

    let response = run(&pipe, request("GET", "/", &[], "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
    assert_eq!(body_string(response).await, "{\"success\":true}");
}

#[tokio::test]
async fn test_send_json_not_acceptable() {
    let pipe = send_json(json!({"success": true}));

    let response = run(&pipe, request("GET", "/", &[("accept", "application/xml")], ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body_string(response).await, "\"application/json\"");
}

#[tokio::test]
async fn test_parse_json_without_content_type() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    let pipe = parse_json(move |_: Value, _ctx| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(StatusCode::OK.into_response()) }
    });

    let response = run(&pipe, request("POST", "/", &[], "\"not json\""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        body_string(response).await,
        "expected Content-Type: application/json"
    );
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_parse_json_empty_unsupported_body() {
    let config = Arc::new(NegotiationConfig {
        unsupported_body: UnsupportedBody::Empty,
        ..NegotiationConfig::default()
    });
    let pipe = parse_json(|_: Value, _ctx| async { Ok(StatusCode::OK.into_response()) })
        .config(config);

    let response = run(&pipe, request("POST", "/", &[("content-type", "text/plain")], "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_string(response).await, "");
}

#[tokio::test]
async fn test_parse_json_missing_content_type_accepted_by_policy() {
    let config = Arc::new(NegotiationConfig {
        missing_content_type: MissingContentType::Accept,
        ..NegotiationConfig::default()
    });
    let pipe = parse_json(|value: Value, ctx| async move { respond_json(&ctx, &value) })
        .config(config);

    let response = run(&pipe, request("POST", "/", &[], "[1,2]")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "[1,2]");

    // A declared non-JSON type is still refused.
    let response = run(&pipe, request("POST", "/", &[("content-type", "text/csv")], "[1,2]"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_parse_json_malformed_body() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    let pipe = parse_json(move |_: Value, _ctx| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(StatusCode::OK.into_response()) }
    });

    let response = run(
        &pipe,
        request("POST", "/", &[("content-type", "application/json")], "{\"ack\":"),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let message = body_string(response).await;
    assert!(message.contains("EOF"), "unexpected message: {message}");
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_parse_json_returns_handler_response_unchanged() {
    let pipe = parse_json(|ack: Ack, _ctx| async move {
        Ok((StatusCode::IM_A_TEAPOT, [("x-ack", ack.ack.to_string())], "brewed").into_response())
    });

    let response = run(
        &pipe,
        request("POST", "/", &[("content-type", "application/json; charset=utf-8")], "{\"ack\":true}"),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(response.headers()["x-ack"], "true");
    assert_eq!(body_string(response).await, "brewed");
}

#[tokio::test]
async fn test_map_json_not_acceptable_after_transform() {
    let transformed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&transformed);
    let pipe = map_json(move |mut ack: Ack| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            ack.ack = true;
            Ok::<_, std::io::Error>(ack)
        }
    });

    let response = run(
        &pipe,
        request(
            "POST",
            "/",
            &[("content-type", "application/json"), ("accept", "application/xml")],
            "{\"ack\":false}",
        ),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body_string(response).await, "\"application/json\"");
    assert_eq!(transformed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_map_json_success() {
    let pipe = map_json(|mut ack: Ack| async move {
        ack.ack = true;
        Ok::<_, std::io::Error>(ack)
    });

    let response = run(
        &pipe,
        request(
            "POST",
            "/",
            &[("content-type", "application/json"), ("accept", "application/json")],
            "{\"ack\":false}",
        ),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
    assert_eq!(body_string(response).await, "{\"ack\":true}");
}

#[tokio::test]
async fn test_map_json_rejects_before_transform() {
    let transformed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&transformed);
    let pipe = map_json(move |ack: Ack| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<_, std::io::Error>(ack) }
    });

    let wrong_type = run(
        &pipe,
        request("POST", "/", &[("content-type", "text/plain"), ("accept", "application/xml")], "{\"ack\":false}"),
    )
    .await
    .unwrap();
    // Content-Type is checked first, so 415 wins over 406.
    assert_eq!(wrong_type.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let malformed = run(
        &pipe,
        request("POST", "/", &[("content-type", "application/json")], "{ack:false}"),
    )
    .await
    .unwrap();
    assert_eq!(malformed.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    assert_eq!(transformed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_map_json_shape_mismatch_is_a_fault() {
    let pipe = map_json(|ack: Ack| async move { Ok::<_, std::io::Error>(ack) });

    let err = run(
        &pipe,
        request("POST", "/", &[("content-type", "application/json")], "{\"ack\":\"yes\"}"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PipeError::Decode(_)));
}

#[tokio::test]
async fn test_map_json_cancellation_abandons_transform() {
    let completed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completed);
    let pipe = map_json(move |ack: Ack| {
        let counter = Arc::clone(&counter);
        async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, std::io::Error>(ack)
        }
    });

    let pending = run(
        &pipe,
        request("POST", "/", &[("content-type", "application/json")], "{\"ack\":false}"),
    );
    let outcome = tokio::time::timeout(Duration::from_millis(20), pending).await;

    assert!(outcome.is_err());
    assert_eq!(completed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_parse_json_typed_target_malformed_after_mismatch() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    let pipe = parse_json(move |_: Ack, _ctx| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(StatusCode::OK.into_response()) }
    });

    let response = run(
        &pipe,
        request("POST", "/", &[("content-type", "application/json")], "{\"ack\":\"yes\","),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(!body_string(response).await.is_empty());
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unparseable_content_type_is_not_missing() {
    let config = Arc::new(NegotiationConfig {
        missing_content_type: MissingContentType::Accept,
        ..NegotiationConfig::default()
    });
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);
    let pipe = parse_json(move |_: Value, _ctx| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(StatusCode::OK.into_response()) }
    })
    .config(config);

    for content_type in ["text", "xml", "garbage;charset=utf-8"] {
        let response = run(&pipe, request("POST", "/", &[("content-type", content_type)], "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE, "{content_type}");
    }
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}
