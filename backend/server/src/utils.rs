use axum::body::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

#[derive(Deserialize, Debug)]
pub struct GenerateRequest {
    pub ingredients: Option<Value>,
}

/// Missing, `null`, `false`, `0`, `""` and `[]` are all the same validation failure.
/// Anything else that is not a list of strings is a malformed payload.
pub fn get_ingredients(body: &Bytes) -> Result<Vec<String>, AppError> {
    let request: GenerateRequest = serde_json::from_slice(body)?;

    let Some(ingredients) = request.ingredients.filter(|value| !is_blank(value)) else {
        return Err(AppError::MissingIngredients);
    };

    Ok(serde_json::from_value(ingredients)?)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bool(true) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;

    use super::get_ingredients;
    use crate::error::AppError;

    fn body(raw: &'static str) -> Bytes {
        Bytes::from_static(raw.as_bytes())
    }

    #[test]
    fn test_basic() {
        let ingredients = get_ingredients(&body(r#"{"ingredients":["chicken"," rice "]}"#)).unwrap();

        assert_eq!(ingredients, vec!["chicken", " rice "]);
    }

    #[test]
    fn test_missing_and_empty() {
        for raw in [r#"{}"#, r#"{"ingredients":null}"#, r#"{"ingredients":[]}"#] {
            assert!(matches!(
                get_ingredients(&body(raw)),
                Err(AppError::MissingIngredients)
            ));
        }
    }

    #[test]
    fn test_falsy_values_missing() {
        for raw in [
            r#"{"ingredients":""}"#,
            r#"{"ingredients":0}"#,
            r#"{"ingredients":0.0}"#,
            r#"{"ingredients":false}"#,
        ] {
            assert!(
                matches!(get_ingredients(&body(raw)), Err(AppError::MissingIngredients)),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_malformed() {
        for raw in [
            "",
            "not json",
            "null",
            r#"{"ingredients":"chicken"}"#,
            r#"{"ingredients":[1]}"#,
            r#"{"ingredients":7}"#,
            r#"{"ingredients":true}"#,
            r#"{"ingredients":{}}"#,
        ] {
            assert!(
                matches!(get_ingredients(&body(raw)), Err(AppError::MalformedPayload(_))),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_extra_fields_ignored() {
        let ingredients = get_ingredients(&body(r#"{"ingredients":["dal"],"lang":"hi"}"#)).unwrap();

        assert_eq!(ingredients, vec!["dal"]);
    }
}
