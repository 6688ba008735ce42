use chrono::{DateTime, Utc};
use kitchen::recipe::Recipe;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::ClientError,
    store::{KeyValueStore, Persisted, StoreError},
};

pub const FAVORITES_KEY: &str = "favorites";
pub const HISTORY_KEY: &str = "history";
pub const THEME_KEY: &str = "theme";
pub const DIET_KEY: &str = "diet";

pub const MAX_HISTORY: usize = 10;
pub const MAX_RATING: u8 = 5;

/// A server recipe plus the fields only the client knows about.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedRecipe {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl SavedRecipe {
    pub fn new(recipe: Recipe, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis().to_string(),
            timestamp: now,
            recipe,
            notes: None,
            rating: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Diet {
    Vegetarian,
    NonVegetarian,
}

/// Favorites, history and display preferences, all backed by one store.
pub struct Library {
    store: Box<dyn KeyValueStore>,
    favorites: Persisted<Vec<SavedRecipe>>,
    history: Persisted<Vec<SavedRecipe>>,
    theme: Persisted<Theme>,
    diet: Persisted<Option<Diet>>,
}

impl Library {
    pub fn open(mut store: Box<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let favorites: Persisted<Vec<SavedRecipe>> = Persisted::open(store.as_mut(), FAVORITES_KEY)?;
        let history: Persisted<Vec<SavedRecipe>> = Persisted::open(store.as_mut(), HISTORY_KEY)?;
        let theme = Persisted::open(store.as_mut(), THEME_KEY)?;
        let diet = Persisted::open(store.as_mut(), DIET_KEY)?;

        debug!(
            "Loaded {} favorites and {} history entries",
            favorites.get().len(),
            history.get().len()
        );

        Ok(Self {
            store,
            favorites,
            history,
            theme,
            diet,
        })
    }

    pub fn favorites(&self) -> &[SavedRecipe] {
        self.favorites.get()
    }

    pub fn history(&self) -> &[SavedRecipe] {
        self.history.get()
    }

    pub fn theme(&self) -> Theme {
        *self.theme.get()
    }

    pub fn diet(&self) -> Option<Diet> {
        *self.diet.get()
    }

    /// Newest first, capped at [`MAX_HISTORY`].
    pub fn record(&mut self, entry: SavedRecipe) -> Result<(), StoreError> {
        self.history.update(self.store.as_mut(), |history| {
            history.retain(|saved| saved.id != entry.id);
            history.insert(0, entry);
            history.truncate(MAX_HISTORY);
        })
    }

    pub fn remove_history(&mut self, id: &str) -> Result<(), ClientError> {
        let removed = self.history.update(self.store.as_mut(), |history| {
            let before = history.len();
            history.retain(|saved| saved.id != id);
            before != history.len()
        })?;

        if !removed {
            return Err(ClientError::NotFound(id.to_string()));
        }

        Ok(())
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        info!("Clearing history");
        self.history.update(self.store.as_mut(), Vec::clear)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites().iter().any(|saved| saved.id == id)
    }

    /// Returns whether `entry` is a favorite afterwards.
    pub fn toggle_favorite(&mut self, entry: &SavedRecipe) -> Result<bool, StoreError> {
        self.favorites.update(self.store.as_mut(), |favorites| {
            let before = favorites.len();
            favorites.retain(|saved| saved.id != entry.id);

            if favorites.len() == before {
                favorites.push(entry.clone());
                true
            } else {
                false
            }
        })
    }

    /// Looks in favorites first since those carry the user's notes.
    pub fn find(&self, id: &str) -> Option<&SavedRecipe> {
        self.favorites()
            .iter()
            .chain(self.history())
            .find(|saved| saved.id == id)
    }

    pub fn find_owned(&self, id: &str) -> Result<SavedRecipe, ClientError> {
        self.find(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }

    /// Sets notes and rating on every stored copy of `id`. `None` leaves a field alone.
    pub fn annotate(
        &mut self,
        id: &str,
        notes: Option<String>,
        rating: Option<u8>,
    ) -> Result<(), ClientError> {
        if let Some(rating) = rating.filter(|rating| !(1..=MAX_RATING).contains(rating)) {
            return Err(ClientError::InvalidRating(rating));
        }

        let apply = |entries: &mut Vec<SavedRecipe>| {
            let mut found = false;

            for saved in entries.iter_mut().filter(|saved| saved.id == id) {
                if let Some(notes) = &notes {
                    saved.notes = (!notes.is_empty()).then(|| notes.clone());
                }
                if rating.is_some() {
                    saved.rating = rating;
                }
                found = true;
            }

            found
        };

        let previous = self.favorites.get().clone();
        let mut favorites = previous.clone();
        let mut history = self.history.get().clone();

        let in_favorites = apply(&mut favorites);
        let in_history = apply(&mut history);

        if !in_favorites && !in_history {
            return Err(ClientError::NotFound(id.to_string()));
        }

        if in_favorites {
            self.favorites.replace(self.store.as_mut(), favorites)?;
        }

        if in_history {
            if let Err(e) = self.history.replace(self.store.as_mut(), history) {
                if in_favorites {
                    if let Err(rollback) = self.favorites.replace(self.store.as_mut(), previous) {
                        warn!("Favorites and history disagree on {id}: {rollback}");
                    }
                }

                return Err(e.into());
            }
        }

        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.theme.update(self.store.as_mut(), |current| *current = theme)
    }

    pub fn set_diet(&mut self, diet: Option<Diet>) -> Result<(), StoreError> {
        self.diet.update(self.store.as_mut(), |current| *current = diet)
    }
}
