mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{ASSISTANT, DIRECTOR, PRODUCER, app, send, token_for};

#[tokio::test]
async fn producer_manages_movies_and_actors() {
    let app = app();
    let producer = token_for(PRODUCER);

    let res = send(
        &app,
        Method::POST,
        "/movies",
        Some(&producer),
        Some(json!({"title": "My movie", "release_date": "2021-03-30"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!({
            "success": true,
            "movie": {"id": 1, "title": "My movie", "release_date": "2021-03-30"},
        })
    );

    let res = send(
        &app,
        Method::POST,
        "/actors",
        Some(&producer),
        Some(json!({"name": "My actor", "age": 42, "gender": 0, "movie_id": 1})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["actor"]["movie_id"], json!(1));

    let res = send(&app, Method::DELETE, "/movies/1", Some(&producer), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({"success": true}));

    let res = send(&app, Method::GET, "/actors/1", Some(&producer), None).await;
    assert_eq!(res.body["actor"]["movie_id"], json!(null));
}

#[tokio::test]
async fn director_edits_actors_but_cannot_add_movies() {
    let app = app();
    let director = token_for(DIRECTOR);

    let res = send(
        &app,
        Method::POST,
        "/actors",
        Some(&director),
        Some(json!({"name": "My actor", "age": 42, "gender": 1})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let id = res.body["actor"]["id"].as_i64().unwrap();

    let res = send(
        &app,
        Method::PATCH,
        &format!("/actors/{id}"),
        Some(&director),
        Some(json!({"age": 43})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["actor"]["age"], json!(43));
    assert_eq!(res.body["actor"]["name"], json!("My actor"));

    let res = send(
        &app,
        Method::POST,
        "/movies",
        Some(&director),
        Some(json!({"title": "Nope", "release_date": "2021-03-30"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = send(&app, Method::DELETE, &format!("/actors/{id}"), Some(&director), None).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn invalid_bodies_are_400() {
    let app = app();
    let producer = token_for(PRODUCER);

    for (uri, body) in [
        ("/actors", json!({"name": "", "age": 42, "gender": 0})),
        ("/actors", json!({"name": "A", "age": "old"})),
        ("/movies", json!({"title": "", "release_date": "2021-03-30"})),
        ("/movies", json!({"title": "T", "release_date": "30/03/2021"})),
    ] {
        let res = send(&app, Method::POST, uri, Some(&producer), Some(body.clone())).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert_eq!(res.body["success"], json!(false));
        assert_eq!(res.body["error"], json!(400));
    }
}

#[tokio::test]
async fn missing_movie_reference_is_422() {
    let app = app();
    let producer = token_for(PRODUCER);

    let res = send(
        &app,
        Method::POST,
        "/actors",
        Some(&producer),
        Some(json!({"name": "A", "age": 30, "movie_id": 77})),
    )
    .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.body["error"], json!(422));
}

#[tokio::test]
async fn unknown_resources_are_404() {
    let app = app();
    let assistant = token_for(ASSISTANT);

    for uri in ["/actors/999", "/movies/999", "/actors/not-a-number"] {
        let res = send(&app, Method::GET, uri, Some(&assistant), None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(res.body["error"], json!(404));
    }

    let res = send(&app, Method::GET, "/nowhere", None, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
