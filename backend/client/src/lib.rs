//! # Recipe Client
//!
//! Client side of the recipe generator: the state the recipe page keeps, without the page.
//!
//! ## Pieces
//! - [`session`]: ingredient form, generation request state, language, servings
//! - [`library`]: favorites, history (10 newest), theme and diet preferences
//! - [`store`]: versioned key-value persistence the library sits on
//! - [`api`]: HTTP client for `POST /api/generate-recipe`
//! - [`timer`], [`shopping`], [`speech`]: conveniences on top of the current recipe
//!
//! ## Flow
//! 1. Fill the form, blank entries are dropped
//! 2. Submit, status goes to loading
//! 3. Success wraps the recipe with a local id and timestamp and pushes it on the history
//! 4. Failure leaves a retry message, nothing retries on its own
pub mod api;
pub mod config;
pub mod error;
pub mod library;
pub mod session;
pub mod shopping;
pub mod speech;
pub mod store;
pub mod timer;

use std::path::Path;

use library::Library;
use store::{FileStore, StoreError};

/// Library backed by one json file per collection under `data_dir`.
pub fn open_library(data_dir: &Path) -> Result<Library, StoreError> {
    Library::open(Box::new(FileStore::new(data_dir)))
}
