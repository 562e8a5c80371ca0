/*
 * Responsibility
 * - /movies 系 CRUD handler
 * - movie を削除すると出演 actor の movie_id は NULL に戻る
 */
use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use serde_json::{Value, json};

use super::{json_body, path_id};
use crate::{
    api::v1::dto::movies::{
        CreateMovieRequest, MovieEnvelope, MovieListEnvelope, UpdateMovieRequest,
    },
    error::AppError,
    repos::catalog::MoviePatch,
    state::AppState,
};

pub async fn list_movies(State(state): State<AppState>) -> Json<MovieListEnvelope> {
    let movies = state
        .catalog
        .list_movies()
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Json(MovieListEnvelope {
        success: true,
        movies,
    })
}

pub async fn get_movie(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MovieEnvelope>, AppError> {
    let id = path_id(path, "movie")?;
    let row = state
        .catalog
        .get_movie(id)
        .await
        .ok_or(AppError::not_found("movie"))?;

    Ok(Json(MovieEnvelope {
        success: true,
        movie: row.into(),
    }))
}

pub async fn add_movie(
    State(state): State<AppState>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> Result<Json<MovieEnvelope>, AppError> {
    let req = json_body(payload)?;
    req.validate().map_err(AppError::BadRequest)?;

    let (Some(title), Some(release_date)) = (req.title.as_deref(), req.release_date) else {
        return Err(AppError::BadRequest("bad request"));
    };

    let row = state.catalog.create_movie(title.trim(), release_date).await;
    tracing::info!(movie_id = row.id, "movie created");

    Ok(Json(MovieEnvelope {
        success: true,
        movie: row.into(),
    }))
}

pub async fn update_movie(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> Result<Json<MovieEnvelope>, AppError> {
    let id = path_id(path, "movie")?;
    let req = json_body(payload)?;
    req.validate().map_err(AppError::BadRequest)?;

    let patch = MoviePatch {
        title: req.title.as_deref().map(str::trim),
        release_date: req.release_date,
    };

    let row = state
        .catalog
        .update_movie(id, patch)
        .await
        .ok_or(AppError::not_found("movie"))?;

    Ok(Json(MovieEnvelope {
        success: true,
        movie: row.into(),
    }))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let id = path_id(path, "movie")?;

    if !state.catalog.delete_movie(id).await {
        return Err(AppError::not_found("movie"));
    }

    tracing::info!(movie_id = id, "movie deleted");
    Ok(Json(json!({"success": true})))
}
