//! Property checks over arbitrary values and headers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

use json_negotiate::http::JSON_CONTENT_TYPE;
use json_negotiate::{parse_json, send_json};

mod common;
use common::{body_string, request, run, runtime};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Sample {
    name: String,
    count: i64,
    flag: bool,
    items: Vec<u16>,
    note: Option<String>,
}

fn sample() -> impl Strategy<Value = Sample> {
    (
        any::<String>(),
        any::<i64>(),
        any::<bool>(),
        prop::collection::vec(any::<u16>(), 0..8),
        proptest::option::of("[a-z ]{0,12}"),
    )
        .prop_map(|(name, count, flag, items, note)| Sample {
            name,
            count,
            flag,
            items,
            note,
        })
}

proptest! {
    #[test]
    fn send_json_emits_canonical_serialization(value in sample(), accept in prop_oneof![Just("*/*"), Just("application/json")]) {
        let expected = serde_json::to_string(&value).unwrap();
        let (status, content_type, body) = runtime().block_on(async {
            let response = run(&send_json(value), request("GET", "/", &[("accept", accept)], ""))
                .await
                .unwrap();
            let status = response.status();
            let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
            (status, content_type, body_string(response).await)
        });

        prop_assert_eq!(status, StatusCode::OK);
        prop_assert_eq!(content_type, JSON_CONTENT_TYPE);
        prop_assert_eq!(body, expected);
    }

    #[test]
    fn send_json_refuses_xml_clients(value in sample()) {
        let (status, body) = runtime().block_on(async {
            let response = run(&send_json(value), request("GET", "/", &[("accept", "application/xml")], ""))
                .await
                .unwrap();
            (response.status(), body_string(response).await)
        });

        prop_assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
        prop_assert_eq!(body, "\"application/json\"");
    }

    #[test]
    fn parse_json_hands_decoded_value_to_handler(value in sample()) {
        let text = serde_json::to_string(&value).unwrap();
        let seen = runtime().block_on(async {
            let pipe = parse_json(|decoded: Sample, _ctx| async move {
                Ok((StatusCode::OK, serde_json::to_string(&decoded).unwrap()).into_response())
            });
            let response = run(&pipe, request("POST", "/", &[("content-type", "application/json")], text))
                .await
                .unwrap();
            body_string(response).await
        });

        let decoded: Sample = serde_json::from_str(&seen).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn parse_json_refuses_non_json_content_types(
        content_type in prop_oneof![
            Just(None),
            Just(Some("text/plain")),
            Just(Some("application/xml")),
            Just(Some("multipart/form-data; boundary=x")),
            Just(Some("application/x-www-form-urlencoded")),
        ],
        body in "\\PC{0,32}",
    ) {
        let invoked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&invoked);
        let status = runtime().block_on(async {
            let pipe = parse_json(move |_: serde_json::Value, _ctx| {
                flag.store(true, Ordering::SeqCst);
                async { Ok(StatusCode::OK.into_response()) }
            });
            let headers: Vec<(&str, &str)> = content_type.iter().map(|ct| ("content-type", *ct)).collect();
            run(&pipe, request("POST", "/", &headers, body)).await.unwrap().status()
        });

        prop_assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        prop_assert!(!invoked.load(Ordering::SeqCst));
    }

    #[test]
    fn parse_json_refuses_malformed_bodies(
        body in "\\PC{0,32}".prop_filter("must not be valid JSON", |s| {
            serde_json::from_str::<serde_json::Value>(s).is_err()
        }),
    ) {
        let invoked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&invoked);
        let (status, message) = runtime().block_on(async {
            let pipe = parse_json(move |_: serde_json::Value, _ctx| {
                flag.store(true, Ordering::SeqCst);
                async { Ok(StatusCode::OK.into_response()) }
            });
            let response = run(&pipe, request("POST", "/", &[("content-type", "application/json")], body))
                .await
                .unwrap();
            (response.status(), body_string(response).await)
        });

        prop_assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        prop_assert!(!message.is_empty());
        prop_assert!(!invoked.load(Ordering::SeqCst));
    }
}
