use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type ProjectionOutcome<T> = Result<T, ProjectionError>;
