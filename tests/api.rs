//! HTTP-level tests for the catalog routes, run against the in-memory store.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use movie_catalog::{app, AppState, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(MemoryStore::new()), 1024 * 1024)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn inception() -> Value {
    json!({
        "title": "Inception",
        "description": "A thief who steals corporate secrets through dreams",
        "trailer": "https://www.youtube.com/watch?v=YoHD9XEInc0",
        "year": 2010,
        "rating": 8.8,
        "genre_id": 1,
        "director_id": 1
    })
}

#[tokio::test]
async fn created_director_reads_back() {
    let app = test_app();
    let (status, created) = send_json(&app, Method::POST, "/directors/", Some(json!({"name": "Nolan"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, json!({"id": 1, "name": "Nolan"}));

    let (status, body) = send_json(&app, Method::GET, "/directors/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Nolan"}));
}

#[tokio::test]
async fn created_movie_reads_back_with_same_fields() {
    let app = test_app();
    let (status, created) = send_json(&app, Method::POST, "/movies/", Some(inception())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, mut body) = send_json(&app, Method::GET, &format!("/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_object_mut().unwrap().remove("id");
    assert_eq!(body, inception());
}

#[tokio::test]
async fn genre_create_answers_created() {
    let app = test_app();
    let (status, body) = send_json(&app, Method::POST, "/genres", Some(json!({"name": "Drama"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Drama");

    let (status, list) = send_json(&app, Method::GET, "/genres/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([{"id": 1, "name": "Drama"}]));
}

#[tokio::test]
async fn missing_movie_is_404_with_empty_body() {
    let app = test_app();
    let (status, bytes) = send(&app, Method::GET, "/movies/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = test_app();
    send_json(&app, Method::POST, "/genres/", Some(json!({"name": "Horror"}))).await;

    let (status, bytes) = send(&app, Method::DELETE, "/genres/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    let (status, _) = send(&app, Method::GET, "/genres/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_absent_records_still_succeeds() {
    let app = test_app();
    for uri in ["/movies/41", "/directors/41", "/genres/41"] {
        let (status, _) = send(&app, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{}", uri);
    }
}

#[tokio::test]
async fn movie_filters_select_exact_subsets() {
    let app = test_app();
    for (title, director, genre) in [("A", 1, 1), ("B", 1, 2), ("C", 2, 2), ("D", 2, 1)] {
        let body = json!({"title": title, "director_id": director, "genre_id": genre});
        let (status, _) = send_json(&app, Method::POST, "/movies/", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let titles = |v: &Value| -> Vec<String> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|m| m["title"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, all) = send_json(&app, Method::GET, "/movies/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&all), ["A", "B", "C", "D"]);

    let (_, by_director) = send_json(&app, Method::GET, "/movies/?director_id=1", None).await;
    assert_eq!(titles(&by_director), ["A", "B"]);

    let (_, by_genre) = send_json(&app, Method::GET, "/movies/?genre_id=1", None).await;
    assert_eq!(titles(&by_genre), ["A", "D"]);

    let (_, both) = send_json(&app, Method::GET, "/movies/?director_id=2&genre_id=2", None).await;
    assert_eq!(titles(&both), ["C"]);

    let (_, none) = send_json(&app, Method::GET, "/movies/?director_id=9", None).await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn scenario_movie_listed_under_its_director() {
    let app = test_app();
    send_json(&app, Method::POST, "/directors/", Some(json!({"name": "Nolan"}))).await;
    send_json(
        &app,
        Method::POST,
        "/movies/",
        Some(json!({"title": "Inception", "year": 2010, "director_id": 1})),
    )
    .await;

    let (status, list) = send_json(&app, Method::GET, "/movies/?director_id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Inception");
    assert_eq!(list[0]["year"], 2010);
    assert_eq!(list[0]["director_id"], 1);
    assert_eq!(list[0]["genre_id"], Value::Null);
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let app = test_app();
    send_json(&app, Method::POST, "/movies/", Some(inception())).await;

    let (status, updated) = send_json(&app, Method::PUT, "/movies/1", Some(json!({"title": "New"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "New");

    let (_, mut body) = send_json(&app, Method::GET, "/movies/1", None).await;
    let mut expected = inception();
    expected["title"] = json!("New");
    body.as_object_mut().unwrap().remove("id");
    assert_eq!(body, expected);
}

#[tokio::test]
async fn update_ignores_supplied_id() {
    let app = test_app();
    send_json(&app, Method::POST, "/directors/", Some(json!({"name": "Nolan"}))).await;
    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/directors/1",
        Some(json!({"id": 77, "name": "Christopher Nolan"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Christopher Nolan"}));
    let (status, _) = send(&app, Method::GET, "/directors/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_of_missing_record_is_404_and_creates_nothing() {
    let app = test_app();
    let (status, bytes) = send(&app, Method::PUT, "/genres/5", Some(json!({"name": "Noir"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(bytes.is_empty());
    let (_, list) = send_json(&app, Method::GET, "/genres/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn rating_keeps_its_fraction_and_year_coerces_from_string() {
    let app = test_app();
    let (status, created) = send_json(
        &app,
        Method::POST,
        "/movies/",
        Some(json!({"title": "Heat", "year": "1995", "rating": 8.3})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["year"], 1995);
    assert_eq!(created["rating"], 8.3);
}

#[tokio::test]
async fn long_text_and_out_of_range_year() {
    let app = test_app();
    let synopsis = "dream ".repeat(60);
    let (status, created) = send_json(
        &app,
        Method::POST,
        "/movies/",
        Some(json!({"title": "Inception", "description": synopsis})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, body) = send_json(&app, Method::GET, &format!("/movies/{}", created["id"]), None).await;
    assert_eq!(body["description"].as_str(), Some(synopsis.as_str()));

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/movies/",
        Some(serde_json::from_str(r#"{"year": 9223372036854775808}"#).unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_input_is_a_client_error() {
    let app = test_app();

    let (status, body) = send_json(&app, Method::POST, "/movies/", Some(json!({"year": "soon"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let (status, _) = send_json(&app, Method::POST, "/directors/", Some(json!(["Nolan"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/genres/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/movies/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/movies/?director_id=x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn common_routes_report_health() {
    let app = test_app();
    let (status, body) = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send_json(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "ok");

    let (status, body) = send_json(&app, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "movie-catalog");
}
