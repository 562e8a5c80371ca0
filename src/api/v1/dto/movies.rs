/*
 * Responsibility
 * - Movies の request/response DTO
 * - release_date は ISO 8601 (YYYY-MM-DD)
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repos::catalog::MovieRow;

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl CreateMovieRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        match &self.title {
            Some(title) if !title.trim().is_empty() => {}
            _ => return Err("title is required"),
        }
        if self.release_date.is_none() {
            return Err("release_date is required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl UpdateMovieRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
}

impl From<MovieRow> for MovieResponse {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            release_date: row.release_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieEnvelope {
    pub success: bool,
    pub movie: MovieResponse,
}

#[derive(Debug, Serialize)]
pub struct MovieListEnvelope {
    pub success: bool,
    pub movies: Vec<MovieResponse>,
}
