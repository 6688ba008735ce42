//! # Session
//!
//! Everything the recipe page keeps in memory.
//!
//! ## Generation
//! - `Idle -> Loading -> Idle | Failed`
//! - Blank form entries are dropped before sending, the rest go out exactly as typed
//! - A form with nothing but blanks fails validation without ever entering `Loading`
//! - Every success lands at the top of the history
//! - Every path out of `generate` leaves `Loading`
//!
//! ## Independent State
//! The displayed recipe is kept apart from the request status. Only a successful generation or
//! [`Session::load`] replaces it, so a failed request leaves the last recipe on screen.
//! Language, servings and favorites don't depend on each other or on the request state.
use chrono::{DateTime, Utc};
use kitchen::{
    nutrition::{self, Estimate},
    pantry,
    recipe::Language,
    servings,
};
use rand::Rng;
use tracing::{info, warn};

use crate::{
    api::RecipeSource,
    error::ClientError,
    library::{Library, SavedRecipe},
    shopping::ShoppingList,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Failed(String),
}

pub struct Session {
    ingredients: Vec<String>,
    status: Status,
    current: Option<SavedRecipe>,
    language: Language,
    servings: Option<u32>,
    library: Library,
    clock: fn() -> DateTime<Utc>,
}

impl Session {
    pub fn new(library: Library) -> Self {
        Self {
            ingredients: vec![String::new()],
            status: Status::Idle,
            current: None,
            language: Language::default(),
            servings: None,
            library,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn add_ingredient(&mut self) {
        self.ingredients.push(String::new());
    }

    pub fn update_ingredient(&mut self, index: usize, value: &str) -> bool {
        match self.ingredients.get_mut(index) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    /// The last remaining entry is never removed.
    pub fn remove_ingredient(&mut self, index: usize) -> bool {
        if self.ingredients.len() <= 1 || index >= self.ingredients.len() {
            return false;
        }

        self.ingredients.remove(index);
        true
    }

    pub fn set_ingredients(&mut self, ingredients: Vec<String>) {
        self.ingredients = if ingredients.is_empty() {
            vec![String::new()]
        } else {
            ingredients
        };
    }

    pub fn submitted(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .filter(|ingredient| !ingredient.trim().is_empty())
            .cloned()
            .collect()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn current(&self) -> Option<&SavedRecipe> {
        self.current.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggle();
        self.language
    }

    pub async fn generate<S: RecipeSource>(&mut self, source: &S) -> Result<SavedRecipe, ClientError> {
        let ingredients = self.submitted();

        if ingredients.is_empty() {
            let error = ClientError::NoIngredients;
            self.status = Status::Failed(error.to_string());
            return Err(error);
        }

        self.status = Status::Loading;
        info!("Generating recipe from {} ingredients", ingredients.len());

        match source.generate(&ingredients).await {
            Ok(recipe) => {
                let saved = SavedRecipe::new(recipe, (self.clock)());
                self.servings = None;
                self.current = Some(saved.clone());

                if let Err(e) = self.library.record(saved.clone()) {
                    warn!("Recipe {} not saved to history: {e}", saved.id);
                    let error = ClientError::from(e);
                    self.status = Status::Failed(error.to_string());

                    return Err(error);
                }

                self.status = Status::Idle;
                Ok(saved)
            }
            Err(e) => {
                warn!("Generation failed: {e}");
                let error = ClientError::Generation(e);
                self.status = Status::Failed(error.to_string());

                Err(error)
            }
        }
    }

    /// Fills the form with a random pantry pick and submits it like any other.
    pub async fn feeling_lucky<S: RecipeSource, R: Rng>(
        &mut self,
        source: &S,
        rng: &mut R,
    ) -> Result<SavedRecipe, ClientError> {
        let picked = pantry::pick(rng);
        info!("Feeling lucky with {}", picked.join(", "));

        self.set_ingredients(picked);
        self.generate(source).await
    }

    /// Shows a stored recipe again without a new request.
    pub fn load(&mut self, id: &str) -> Result<SavedRecipe, ClientError> {
        let saved = self.library.find_owned(id)?;

        self.servings = None;
        self.status = Status::Idle;
        self.current = Some(saved.clone());

        Ok(saved)
    }

    pub fn toggle_favorite(&mut self) -> Result<bool, ClientError> {
        let Some(saved) = &self.current else {
            return Err(ClientError::NotFound("current".to_string()));
        };

        Ok(self.library.toggle_favorite(saved)?)
    }

    pub fn is_favorite(&self) -> bool {
        self.current()
            .is_some_and(|saved| self.library.is_favorite(&saved.id))
    }

    pub fn set_servings(&mut self, servings: u32) {
        self.servings = Some(servings);
    }

    pub fn servings(&self) -> Option<u32> {
        self.current()
            .map(|saved| self.servings.unwrap_or(saved.recipe.servings))
    }

    fn ratio(&self, saved: &SavedRecipe) -> f64 {
        servings::ratio(saved.recipe.servings, self.servings.unwrap_or(saved.recipe.servings))
    }

    /// Ingredient lines in the active language, scaled to the chosen servings.
    pub fn scaled_ingredients(&self) -> Vec<String> {
        self.current()
            .map(|saved| {
                servings::scale_lines(saved.recipe.ingredients_in(self.language), self.ratio(saved))
            })
            .unwrap_or_default()
    }

    pub fn nutrition(&self) -> Option<Estimate> {
        let saved = self.current()?;

        Some(nutrition::for_recipe(
            &saved.recipe,
            self.servings.unwrap_or(saved.recipe.servings),
        ))
    }

    pub fn shopping_list(&self) -> Option<ShoppingList> {
        self.current()
            .map(|saved| ShoppingList::new(saved.recipe.ingredients_in(self.language)))
    }

    pub fn narration(&self) -> Option<String> {
        self.current()
            .map(|saved| saved.recipe.narration(self.language))
    }
}
