//! Pass-through seam between the HTTP handlers and the word repository.
//! Kept free of business logic on purpose; validation lives in the API
//! layer and persistence in [`crate::db::words`].

use crate::db::words::{self, Word};
use crate::db::{StoreError, WordStore};

pub async fn get_all_words(store: &WordStore) -> Result<Vec<Word>, StoreError> {
    words::list_all(store).await
}

pub async fn add_word(store: &WordStore, italian: &str, english: &str) -> Result<Word, StoreError> {
    words::insert(store, italian, english).await
}
