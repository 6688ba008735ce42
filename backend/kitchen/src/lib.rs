//! # Kitchen
//!
//! Recipe domain shared by the server and the client.
//!
//! ## Templates
//!
//! - Three fixed dishes: Curry, Rice, Dal Tadka
//! - First submitted ingredient goes into the title and the lead step
//! - Every other ingredient gets its own "Add X and mix well." step right after the lead step
//! - Submitted ingredients are prepended to the fixed tail ingredients, both languages
//!
//! ## Client Helpers
//!
//! - Serving scaling through an explicit quantity parser, nothing is evaluated
//! - Keyword nutrition estimate, an approximation only
//! - Pantry vocabulary for "feeling lucky"
use rand::Rng;
use thiserror::Error;

pub mod nutrition;
pub mod pantry;
pub mod quantity;
pub mod recipe;
pub mod servings;
pub mod templates;

use recipe::Recipe;
use templates::Dish;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecipeError {
    #[error("Please provide at least one ingredient")]
    NoIngredients,
}

/// Picks one of the three dishes uniformly and fills it with `ingredients`.
pub fn generate<R: Rng + ?Sized>(ingredients: &[String], rng: &mut R) -> Result<Recipe, RecipeError> {
    if ingredients.is_empty() {
        return Err(RecipeError::NoIngredients);
    }

    Dish::choose(rng).template().render(ingredients)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::{RecipeError, generate, templates::Dish};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_ingredients() {
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(generate(&[], &mut rng), Err(RecipeError::NoIngredients));
    }

    #[test]
    fn test_chicken_titles() {
        let mut rng = StdRng::seed_from_u64(42);
        let titles = [
            "Delicious chicken Curry",
            "Spicy chicken Rice",
            "chicken Dal Tadka",
        ];

        for _ in 0..30 {
            let recipe = generate(&strings(&["chicken"]), &mut rng).unwrap();

            assert!(titles.contains(&recipe.title.as_str()), "{}", recipe.title);
            assert_eq!(recipe.servings, 4);
        }
    }

    #[test]
    fn test_instruction_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let ingredients = strings(&["paneer", "peas", "cream"]);

        for _ in 0..30 {
            let recipe = generate(&ingredients, &mut rng).unwrap();
            let dish = Dish::ALL
                .into_iter()
                .find(|dish| dish.template().title(&ingredients[0]) == recipe.title)
                .unwrap();
            let expected = dish.template().step_count() + ingredients.len() - 1;

            assert_eq!(recipe.instructions.len(), expected);
            assert_eq!(recipe.instructions_hindi.len(), expected);
        }
    }

    #[test]
    fn test_ingredients_verbatim() {
        let mut rng = StdRng::seed_from_u64(3);
        let ingredients = strings(&["  Spinach ", "1 cup curd", "भिंडी"]);
        let recipe = generate(&ingredients, &mut rng).unwrap();

        assert_eq!(&recipe.ingredients[..3], &ingredients[..]);
        assert_eq!(&recipe.ingredients_hindi[..3], &ingredients[..]);
    }

    #[test]
    fn test_seeded_sequence_repeats() {
        let ingredients = strings(&["okra"]);
        let titles = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| generate(&ingredients, &mut rng).unwrap().title)
                .collect::<Vec<_>>()
        };

        assert_eq!(titles(99), titles(99));
    }
}
