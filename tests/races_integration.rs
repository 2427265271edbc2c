// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Races page tests against a mock events API.

use axum::http::StatusCode;
use chrono::{Duration, SecondsFormat, Utc};
use runlog_tracker::config::Config;
use runlog_tracker::db::LocalStore;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{create_test_app, create_test_app_with, get, json_body, offline_config};

fn events_config(server: &MockServer) -> Config {
    Config {
        events_api_url: format!("{}/api/events/recommendedEvents", server.uri()),
        ..offline_config()
    }
}

fn days_from_now(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[tokio::test]
async fn test_upcoming_races_sorted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/recommendedEvents"))
        .and(query_param("Language", "ru"))
        .and(query_param("Size", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "Id": 3, "Title": "Next week", "DateStart": days_from_now(7), "City": { "Name": "Сочи" } },
            { "Id": 1, "Title": "Last week", "DateStart": days_from_now(-7) },
            { "id": "2", "name": "Tomorrow", "startDate": days_from_now(1), "city": "Тверь" },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (app, _state) = create_test_app_with(events_config(&server), LocalStore::in_memory());
    let response = app.oneshot(get("/api/races")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["state"], "loaded");

    let races = body["races"].as_array().unwrap();
    let titles: Vec<&str> = races.iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Tomorrow", "Next week"]);
    assert_eq!(races[0]["city"], "Тверь");
    assert_eq!(races[1]["city"], "Сочи");
    assert_eq!(races[1]["id"], "3");
}

#[tokio::test]
async fn test_no_upcoming_races_is_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [{ "Title": "Old", "DateStart": days_from_now(-30) }]
        })))
        .mount(&server)
        .await;

    let (app, _state) = create_test_app_with(events_config(&server), LocalStore::in_memory());
    let response = app.oneshot(get("/api/races")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["state"], "empty");
    assert_eq!(body["message"], "Соревнований не найдено");
}

#[tokio::test]
async fn test_upstream_error_is_failed_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let (app, _state) = create_test_app_with(events_config(&server), LocalStore::in_memory());
    let response = app.oneshot(get("/api/races")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["state"], "failed");
    assert_eq!(
        body["message"],
        "Не удалось загрузить список соревнований. Попробуйте позже."
    );
}

#[tokio::test]
async fn test_unparsable_body_is_failed_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let (app, _state) = create_test_app_with(events_config(&server), LocalStore::in_memory());
    let response = app.oneshot(get("/api/races")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_unreachable_events_api_is_failed_state() {
    let (app, _state) = create_test_app();

    let response = app.oneshot(get("/api/races")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json_body(response).await["state"], "failed");
}
