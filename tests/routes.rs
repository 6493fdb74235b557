//! The contact handler served over HTTP

mod helpers;

use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    http::{Method, StatusCode, header},
};
use helpers::{ANA_FORM, FailingSender, RecordingSender, handler_with};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_text(response: axum::response::Response) -> anyhow::Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

fn assert_cors_headers(response: &axum::response::Response) {
    let get = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };

    assert_eq!(
        get("access-control-allow-origin").as_deref(),
        Some("https://treid.com.br")
    );
    assert_eq!(
        get("access-control-allow-headers").as_deref(),
        Some("Content-Type, Origin")
    );
    assert_eq!(
        get("access-control-allow-methods").as_deref(),
        Some("POST, OPTIONS")
    );
}

#[tokio::test]
async fn test_http_preflight() -> anyhow::Result<()> {
    let app = treid_contact::routes::router(handler_with(Arc::new(RecordingSender::default())));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/")
                .header(header::ORIGIN, "https://treid.com.br")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    assert_eq!(body_text(response).await?, "");

    Ok(())
}

#[tokio::test]
async fn test_http_submission() -> anyhow::Result<()> {
    let sender = Arc::new(RecordingSender::default());
    let app = treid_contact::routes::router(handler_with(sender.clone()));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(ANA_FORM))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    assert_eq!(
        body_text(response).await?,
        r#"{"message":"Email sent successfully"}"#
    );
    assert_eq!(sender.sent().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_http_missing_body_on_any_path() -> anyhow::Result<()> {
    let app = treid_contact::routes::router(handler_with(Arc::new(RecordingSender::default())));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/contato")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors_headers(&response);
    assert_eq!(
        body_text(response).await?,
        r#"{"error":"Missing request body"}"#
    );

    Ok(())
}

#[tokio::test]
async fn test_http_delivery_failure() -> anyhow::Result<()> {
    let app = treid_contact::routes::router(handler_with(Arc::new(FailingSender::default())));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/")
                .body(Body::from(ANA_FORM))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&response);
    assert_eq!(
        body_text(response).await?,
        r#"{"error":"Failed to send email"}"#
    );

    Ok(())
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let app = treid_contact::routes::router(handler_with(Arc::new(RecordingSender::default())));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, r#"{"status":"ok"}"#);

    Ok(())
}
