use thiserror::Error;

use crate::domain::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    #[error("Persistence error: {0:#}")]
    Persistence(#[from] anyhow::Error),
}
