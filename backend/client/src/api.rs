use std::future::Future;

use kitchen::recipe::Recipe;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const GENERATE_PATH: &str = "/api/generate-recipe";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server answered {status}: {message}")]
    Status { status: StatusCode, message: String },
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    ingredients: &'a [String],
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Anything that can turn an ingredient list into a recipe.
pub trait RecipeSource {
    fn generate(&self, ingredients: &[String]) -> impl Future<Output = Result<Recipe, ApiError>> + Send;
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }
}

impl RecipeSource for ApiClient {
    async fn generate(&self, ingredients: &[String]) -> Result<Recipe, ApiError> {
        let endpoint = self.endpoint();
        debug!("POST {endpoint} with {} ingredients", ingredients.len());

        let response = self
            .client
            .post(&endpoint)
            .json(&GenerateRequest { ingredients })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
            };
            warn!("Recipe generation failed with {status}: {message}");

            return Err(ApiError::Status { status, message });
        }

        Ok(response.json::<Recipe>().await?)
    }
}
