/*
 * Responsibility
 * - Actors の request/response DTO
 * - validation (形式チェック) 用の validate()
 */
use serde::{Deserialize, Serialize};

use super::nullable;
use crate::repos::catalog::ActorRow;

const GENDERS: [i32; 2] = [0, 1];

#[derive(Debug, Deserialize)]
pub struct CreateActorRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<i32>,
    pub movie_id: Option<i64>,
}

impl CreateActorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        match &self.name {
            Some(name) if !name.trim().is_empty() => {}
            _ => return Err("name is required"),
        }
        match self.age {
            Some(age) if age > 0 => {}
            _ => return Err("age must be a positive integer"),
        }
        if let Some(gender) = self.gender
            && !GENDERS.contains(&gender)
        {
            return Err("gender must be 0 or 1");
        }

        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateActorRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub gender: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub movie_id: Option<Option<i64>>,
}

impl UpdateActorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(age) = self.age
            && age <= 0
        {
            return Err("age must be a positive integer");
        }
        if let Some(Some(gender)) = self.gender
            && !GENDERS.contains(&gender)
        {
            return Err("gender must be 0 or 1");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: Option<i32>,
    pub movie_id: Option<i64>,
}

impl From<ActorRow> for ActorResponse {
    fn from(row: ActorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
            movie_id: row.movie_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActorEnvelope {
    pub success: bool,
    pub actor: ActorResponse,
}

#[derive(Debug, Serialize)]
pub struct ActorListEnvelope {
    pub success: bool,
    pub actors: Vec<ActorResponse>,
}
