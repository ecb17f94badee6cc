use serde::{Deserialize, Serialize};

/// One Italian/English translation record as served by the words API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub italian_word: String,
    pub english_word: String,
    #[serde(default)]
    pub created_at: String,
}

impl Word {
    pub fn new(id: i64, italian: &str, english: &str) -> Self {
        Self {
            id,
            italian_word: italian.to_string(),
            english_word: english.to_string(),
            created_at: String::new(),
        }
    }
}
