use thiserror::Error;

use crate::{api::ApiError, store::StoreError};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Please add at least one ingredient")]
    NoIngredients,

    #[error("Failed to generate recipe. Please try again.")]
    Generation(#[source] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No saved recipe with id {0}")]
    NotFound(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
}
