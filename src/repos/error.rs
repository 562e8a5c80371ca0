/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),
}
