use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use kitchen::RecipeError;

pub const GENERATION_FAILED: &str = "Failed to generate recipe";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please provide at least one ingredient")]
    MissingIngredients,

    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RecipeError> for AppError {
    fn from(error: RecipeError) -> Self {
        match error {
            RecipeError::NoIngredients => AppError::MissingIngredients,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingIngredients => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::MalformedPayload { .. } | AppError::Internal { .. } => {
                error!("Error generating recipe: {self}");

                (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
