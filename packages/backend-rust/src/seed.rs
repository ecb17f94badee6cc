use crate::db::{words, WordStore};

/// Starter vocabulary, seeded when `SEED_DEFAULT_WORDS` is set. Pairs whose
/// Italian word already exists are skipped, so re-running is harmless.
const DEFAULT_WORDS: &[(&str, &str)] = &[
    ("ciao", "hello"),
    ("grazie", "thank you"),
    ("gatto", "cat"),
    ("cane", "dog"),
    ("casa", "house"),
    ("libro", "book"),
    ("acqua", "water"),
    ("pane", "bread"),
    ("latte", "milk"),
    ("giorno", "day"),
    ("notte", "night"),
    ("sole", "sun"),
    ("luna", "moon"),
    ("mare", "sea"),
    ("strada", "street"),
    ("amico", "friend"),
    ("tempo", "time"),
    ("lavoro", "work"),
    ("scuola", "school"),
    ("parola", "word"),
];

pub async fn seed_default_words(store: &WordStore) {
    let enabled = std::env::var("SEED_DEFAULT_WORDS")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    if !enabled {
        return;
    }

    tracing::info!(total = DEFAULT_WORDS.len(), "seeding default word pairs");

    match words::seed_pairs(store, DEFAULT_WORDS).await {
        Ok(inserted) => {
            tracing::info!(inserted, skipped = DEFAULT_WORDS.len() as u64 - inserted, "seed complete");
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to seed default words");
        }
    }
}
