use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract,
    http::StatusCode,
    response::IntoResponse,
};
use kitchen::{generate, recipe::Recipe};
use serde_json::json;
#[cfg(feature = "verbose")]
use tracing::info;

use crate::{error::AppError, state::State, utils::get_ingredients};

pub async fn generate_recipe_handler(
    extract::State(state): extract::State<Arc<State>>,
    body: Bytes,
) -> Result<Json<Recipe>, AppError> {
    let ingredients = get_ingredients(&body)?;

    #[cfg(feature = "verbose")]
    info!("Generating recipe for {:?}", ingredients);

    let mut rng = state
        .rng
        .lock()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(generate(&ingredients, &mut *rng)?))
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::{app, config::Config, state::State};

    const TITLES: [&str; 3] = ["Delicious {} Curry", "Spicy {} Rice", "{} Dal Tadka"];
    const STEP_COUNTS: [usize; 3] = [8, 10, 11];

    fn router(seed: u64) -> Router {
        app(State::new(Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            recipe_seed: Some(seed),
        }))
    }

    async fn post(router: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::post("/api/generate-recipe")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn template_index(title: &str, first: &str) -> Option<usize> {
        TITLES
            .iter()
            .position(|pattern| pattern.replace("{}", first) == title)
    }

    #[tokio::test]
    async fn test_chicken() {
        for seed in 0..10 {
            let (status, recipe) = post(router(seed), r#"{"ingredients":["chicken"]}"#).await;

            assert_eq!(status, StatusCode::OK);
            assert!(template_index(recipe["title"].as_str().unwrap(), "chicken").is_some());
            assert_eq!(recipe["servings"], 4);
        }
    }

    #[tokio::test]
    async fn test_instruction_count_and_verbatim_ingredients() {
        let submitted = ["paneer", "2 tomatoes", "  peas"];
        let body = json!({ "ingredients": submitted }).to_string();

        for seed in 0..10 {
            let (status, recipe) = post(router(seed), &body).await;
            assert_eq!(status, StatusCode::OK);

            let index = template_index(recipe["title"].as_str().unwrap(), "paneer").unwrap();
            let expected = STEP_COUNTS[index] + submitted.len() - 1;

            assert_eq!(recipe["instructions"].as_array().unwrap().len(), expected);
            assert_eq!(recipe["instructionsHindi"].as_array().unwrap().len(), expected);

            for field in ["ingredients", "ingredientsHindi"] {
                let listed = recipe[field].as_array().unwrap();

                for ingredient in submitted {
                    assert!(listed.contains(&json!(ingredient)));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_empty_ingredients() {
        let (status, body) = post(router(1), r#"{"ingredients":[]}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Please provide at least one ingredient" }));
    }

    #[tokio::test]
    async fn test_missing_ingredients() {
        let (status, body) = post(router(1), "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please provide at least one ingredient");
    }

    #[tokio::test]
    async fn test_falsy_ingredients() {
        for raw in [r#"{"ingredients":""}"#, r#"{"ingredients":false}"#, r#"{"ingredients":0}"#] {
            let (status, _) = post(router(1), raw).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{raw}");
        }

        let (status, _) = post(router(1), r#"{"ingredients":"chicken"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (status, body) = post(router(1), "{ingredients: chicken").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to generate recipe" }));
    }

    #[tokio::test]
    async fn test_same_seed_same_recipe() {
        let body = r#"{"ingredients":["okra","onion"]}"#;
        let (_, first) = post(router(5), body).await;
        let (_, second) = post(router(5), body).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/api/health").body(Body::empty()).unwrap();
        let response = router(0).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
