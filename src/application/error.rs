use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cannot record an empty message")]
    EmptyMessage,

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
