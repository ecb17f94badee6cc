use crate::api::{ApiClient, ClientError};
use crate::loader::FetchGuard;
use crate::types::Word;

/// Direction of the substring match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Query an English word, find its Italian translations.
    EnglishToItalian,
    /// Query an Italian word, find its English translations.
    ItalianToEnglish,
}

impl Default for SearchMode {
    fn default() -> Self {
        SearchMode::EnglishToItalian
    }
}

impl SearchMode {
    pub fn toggled(self) -> Self {
        match self {
            SearchMode::EnglishToItalian => SearchMode::ItalianToEnglish,
            SearchMode::ItalianToEnglish => SearchMode::EnglishToItalian,
        }
    }

    fn haystack<'a>(&self, word: &'a Word) -> &'a str {
        match self {
            SearchMode::EnglishToItalian => &word.english_word,
            SearchMode::ItalianToEnglish => &word.italian_word,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub mode: SearchMode,
    pub query: String,
    pub matches: Vec<Word>,
}

/// Outcome of one search submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Empty query: results cleared, no request issued.
    Cleared,
    /// The word list is not cached yet; fetch it, [`SearchSession::prime`]
    /// the session and search again.
    NeedsFetch,
    Found(SearchResults),
    NoMatches { query: String },
}

/// Dictionary-lookup session over a lazily cached word list.
///
/// The cache fills once per session and is deliberately not refreshed on
/// subsequent searches, so words added meanwhile are not reflected until
/// [`SearchSession::invalidate_cache`] is called. Searching never alters a
/// running quiz session.
#[derive(Debug, Default)]
pub struct SearchSession {
    mode: SearchMode,
    cache: Option<Vec<Word>>,
    last: Option<SearchOutcome>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Flips the match direction and clears the previous results.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.last = None;
    }

    pub fn is_primed(&self) -> bool {
        self.cache.is_some()
    }

    /// Fills the session cache with the fetched word list.
    pub fn prime(&mut self, words: Vec<Word>) {
        self.cache = Some(words);
    }

    /// Drops the cached list; the next search reports [`SearchOutcome::NeedsFetch`].
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
    }

    /// Case-insensitive substring match of `query` against the field
    /// selected by the current mode.
    pub fn search(&mut self, query: &str) -> SearchOutcome {
        self.last = None;

        let trimmed = query.trim();
        if trimmed.is_empty() {
            return SearchOutcome::Cleared;
        }

        let Some(cache) = &self.cache else {
            return SearchOutcome::NeedsFetch;
        };

        let needle = trimmed.to_lowercase();
        let matches: Vec<Word> = cache
            .iter()
            .filter(|word| self.mode.haystack(word).to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let outcome = if matches.is_empty() {
            SearchOutcome::NoMatches {
                query: query.to_string(),
            }
        } else {
            SearchOutcome::Found(SearchResults {
                mode: self.mode,
                query: query.to_string(),
                matches,
            })
        };

        self.last = Some(outcome.clone());
        outcome
    }

    pub fn results(&self) -> Option<&SearchOutcome> {
        self.last.as_ref()
    }
}

/// Async shell around [`SearchSession`]: performs the lazy one-shot word
/// list fetch the first time a non-empty query is submitted.
pub struct SearchClient {
    api: ApiClient,
    guard: FetchGuard,
    session: SearchSession,
}

impl SearchClient {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            guard: FetchGuard::new(),
            session: SearchSession::new(),
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    pub async fn search(&mut self, query: &str) -> Result<SearchOutcome, ClientError> {
        match self.session.search(query) {
            SearchOutcome::NeedsFetch => {
                let ticket = self.guard.begin();
                match self.api.fetch_words().await {
                    Ok(words) => {
                        if self.guard.is_current(ticket) {
                            self.session.prime(words);
                        }
                        Ok(self.session.search(query))
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "word list fetch failed");
                        Err(err)
                    }
                }
            }
            outcome => Ok(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_words() -> Vec<Word> {
        vec![
            Word::new(1, "ciao", "hello"),
            Word::new(2, "gatto", "cat"),
            Word::new(3, "cappuccio", "hood"),
        ]
    }

    fn primed_session() -> SearchSession {
        let mut session = SearchSession::new();
        session.prime(sample_words());
        session
    }

    #[test]
    fn test_unprimed_session_needs_fetch() {
        let mut session = SearchSession::new();
        assert_eq!(session.search("cat"), SearchOutcome::NeedsFetch);
        assert!(!session.is_primed());
    }

    #[test]
    fn test_empty_query_clears_without_fetch() {
        let mut session = SearchSession::new();
        assert_eq!(session.search("   "), SearchOutcome::Cleared);
        assert_eq!(session.results(), None);
    }

    #[test]
    fn test_italian_substring_match_is_case_insensitive() {
        let mut session = primed_session();
        session.toggle_mode();
        assert_eq!(session.mode(), SearchMode::ItalianToEnglish);

        match session.search("CIA") {
            SearchOutcome::Found(results) => {
                assert_eq!(results.matches.len(), 1);
                assert_eq!(results.matches[0].italian_word, "ciao");
            }
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn test_english_mode_searches_english_field() {
        let mut session = primed_session();

        match session.search("cat") {
            SearchOutcome::Found(results) => {
                assert_eq!(results.matches.len(), 1);
                assert_eq!(results.matches[0].italian_word, "gatto");
            }
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn test_substring_matches_multiple_rows() {
        let mut session = primed_session();
        session.toggle_mode();

        match session.search("c") {
            SearchOutcome::Found(results) => {
                let italians: Vec<&str> = results
                    .matches
                    .iter()
                    .map(|w| w.italian_word.as_str())
                    .collect();
                assert_eq!(italians, vec!["ciao", "cappuccio"]);
            }
            other => panic!("expected matches, got {other:?}"),
        }
    }

    #[test]
    fn test_no_matches_is_a_distinct_state() {
        let mut session = primed_session();
        let outcome = session.search("xyz");
        assert_eq!(
            outcome,
            SearchOutcome::NoMatches {
                query: "xyz".to_string()
            }
        );
        assert_eq!(session.results(), Some(&outcome));
    }

    #[test]
    fn test_toggle_clears_results() {
        let mut session = primed_session();
        session.search("cat");
        assert!(session.results().is_some());

        session.toggle_mode();
        assert_eq!(session.results(), None);
        assert_eq!(session.mode(), SearchMode::ItalianToEnglish);
    }

    #[test]
    fn test_cache_is_stale_until_invalidated() {
        let mut session = primed_session();

        // A word added after priming is not visible...
        match session.search("hood") {
            SearchOutcome::Found(results) => assert_eq!(results.matches.len(), 1),
            other => panic!("expected a match, got {other:?}"),
        }
        assert_eq!(
            session.search("dog"),
            SearchOutcome::NoMatches {
                query: "dog".to_string()
            }
        );

        // ...until the cache is explicitly dropped and re-primed.
        session.invalidate_cache();
        assert_eq!(session.search("dog"), SearchOutcome::NeedsFetch);

        let mut words = sample_words();
        words.push(Word::new(4, "cane", "dog"));
        session.prime(words);

        match session.search("dog") {
            SearchOutcome::Found(results) => {
                assert_eq!(results.matches[0].italian_word, "cane");
            }
            other => panic!("expected a match, got {other:?}"),
        }
    }
}
