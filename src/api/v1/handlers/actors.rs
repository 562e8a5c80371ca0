/*
 * Responsibility
 * - /actors 系 CRUD handler
 * - 権限チェックは routes 側の requires_auth が済ませている前提
 */
use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use serde_json::{Value, json};

use super::{json_body, path_id};
use crate::{
    api::v1::dto::actors::{
        ActorEnvelope, ActorListEnvelope, CreateActorRequest, UpdateActorRequest,
    },
    error::AppError,
    repos::catalog::{ActorPatch, NewActor},
    state::AppState,
};

pub async fn list_actors(State(state): State<AppState>) -> Json<ActorListEnvelope> {
    let actors = state
        .catalog
        .list_actors()
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Json(ActorListEnvelope {
        success: true,
        actors,
    })
}

pub async fn get_actor(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ActorEnvelope>, AppError> {
    let id = path_id(path, "actor")?;
    let row = state
        .catalog
        .get_actor(id)
        .await
        .ok_or(AppError::not_found("actor"))?;

    Ok(Json(ActorEnvelope {
        success: true,
        actor: row.into(),
    }))
}

pub async fn add_actor(
    State(state): State<AppState>,
    payload: Result<Json<CreateActorRequest>, JsonRejection>,
) -> Result<Json<ActorEnvelope>, AppError> {
    let req = json_body(payload)?;
    req.validate().map_err(AppError::BadRequest)?;

    let (Some(name), Some(age)) = (req.name.as_deref(), req.age) else {
        return Err(AppError::BadRequest("bad request"));
    };

    let row = state
        .catalog
        .create_actor(NewActor {
            name: name.trim(),
            age,
            gender: req.gender,
            movie_id: req.movie_id,
        })
        .await?;

    tracing::info!(actor_id = row.id, "actor created");

    Ok(Json(ActorEnvelope {
        success: true,
        actor: row.into(),
    }))
}

pub async fn update_actor(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateActorRequest>, JsonRejection>,
) -> Result<Json<ActorEnvelope>, AppError> {
    let id = path_id(path, "actor")?;
    let req = json_body(payload)?;
    req.validate().map_err(AppError::BadRequest)?;

    let patch = ActorPatch {
        name: req.name.as_deref().map(str::trim),
        age: req.age,
        gender: req.gender,
        movie_id: req.movie_id,
    };

    let row = state
        .catalog
        .update_actor(id, patch)
        .await?
        .ok_or(AppError::not_found("actor"))?;

    Ok(Json(ActorEnvelope {
        success: true,
        actor: row.into(),
    }))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let id = path_id(path, "actor")?;

    if !state.catalog.delete_actor(id).await {
        return Err(AppError::not_found("actor"));
    }

    tracing::info!(actor_id = id, "actor deleted");
    Ok(Json(json!({"success": true})))
}
