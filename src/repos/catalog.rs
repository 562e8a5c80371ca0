/*
 * Responsibility
 * - actors / movies の保存 (プロセス内)
 * - id は 1 からの連番、一覧は id 昇順
 * - actor.movie_id は存在する movie を指す (movie 削除時は NULL に戻す)
 */
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorRow {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: Option<i32>,
    pub movie_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
}

#[derive(Debug)]
pub struct NewActor<'a> {
    pub name: &'a str,
    pub age: i32,
    pub gender: Option<i32>,
    pub movie_id: Option<i64>,
}

/// Partial update. Outer `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct ActorPatch<'a> {
    pub name: Option<&'a str>,
    pub age: Option<i32>,
    pub gender: Option<Option<i32>>,
    pub movie_id: Option<Option<i64>>,
}

#[derive(Debug, Default)]
pub struct MoviePatch<'a> {
    pub title: Option<&'a str>,
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Default)]
struct Tables {
    actors: BTreeMap<i64, ActorRow>,
    movies: BTreeMap<i64, MovieRow>,
    next_actor_id: i64,
    next_movie_id: i64,
}

impl Tables {
    fn check_movie(&self, movie_id: Option<i64>) -> Result<(), RepoError> {
        match movie_id {
            Some(id) if !self.movies.contains_key(&id) => Err(RepoError::MissingReference("movie")),
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tables: Arc<RwLock<Tables>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_actors(&self) -> Vec<ActorRow> {
        self.tables.read().await.actors.values().cloned().collect()
    }

    pub async fn get_actor(&self, id: i64) -> Option<ActorRow> {
        self.tables.read().await.actors.get(&id).cloned()
    }

    pub async fn create_actor(&self, new: NewActor<'_>) -> Result<ActorRow, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_movie(new.movie_id)?;

        tables.next_actor_id += 1;
        let row = ActorRow {
            id: tables.next_actor_id,
            name: new.name.to_string(),
            age: new.age,
            gender: new.gender,
            movie_id: new.movie_id,
        };
        tables.actors.insert(row.id, row.clone());

        Ok(row)
    }

    pub async fn update_actor(
        &self,
        id: i64,
        patch: ActorPatch<'_>,
    ) -> Result<Option<ActorRow>, RepoError> {
        let mut tables = self.tables.write().await;
        if let Some(movie_id) = patch.movie_id {
            tables.check_movie(movie_id)?;
        }

        let Some(row) = tables.actors.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name.to_string();
        }
        if let Some(age) = patch.age {
            row.age = age;
        }
        if let Some(gender) = patch.gender {
            row.gender = gender;
        }
        if let Some(movie_id) = patch.movie_id {
            row.movie_id = movie_id;
        }

        Ok(Some(row.clone()))
    }

    pub async fn delete_actor(&self, id: i64) -> bool {
        self.tables.write().await.actors.remove(&id).is_some()
    }

    pub async fn list_movies(&self) -> Vec<MovieRow> {
        self.tables.read().await.movies.values().cloned().collect()
    }

    pub async fn get_movie(&self, id: i64) -> Option<MovieRow> {
        self.tables.read().await.movies.get(&id).cloned()
    }

    pub async fn create_movie(&self, title: &str, release_date: NaiveDate) -> MovieRow {
        let mut tables = self.tables.write().await;
        tables.next_movie_id += 1;
        let row = MovieRow {
            id: tables.next_movie_id,
            title: title.to_string(),
            release_date,
        };
        tables.movies.insert(row.id, row.clone());
        row
    }

    pub async fn update_movie(&self, id: i64, patch: MoviePatch<'_>) -> Option<MovieRow> {
        let mut tables = self.tables.write().await;
        let row = tables.movies.get_mut(&id)?;
        if let Some(title) = patch.title {
            row.title = title.to_string();
        }
        if let Some(release_date) = patch.release_date {
            row.release_date = release_date;
        }
        Some(row.clone())
    }

    pub async fn delete_movie(&self, id: i64) -> bool {
        let mut tables = self.tables.write().await;
        if tables.movies.remove(&id).is_none() {
            return false;
        }
        for actor in tables.actors.values_mut() {
            if actor.movie_id == Some(id) {
                actor.movie_id = None;
            }
        }
        true
    }
}
