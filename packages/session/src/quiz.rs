use rand::seq::SliceRandom;
use rand::Rng;

use crate::api::{ApiClient, ClientError};
use crate::form::AddWordForm;
use crate::loader::{FetchGuard, FetchTicket};
use crate::types::Word;

/// Guesses allowed per word before the answer is revealed.
pub const MAX_ATTEMPTS: u32 = 2;

const HINT_PLACEHOLDER: char = '_';

/// Outcome of one answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Exact match after normalization. The session stays on this word
    /// until [`QuizSession::advance`] is called, so the UI can show its
    /// transient feedback and advance after a delay.
    Correct,
    /// Wrong answer with attempts remaining; the input has been cleared.
    Incorrect { attempts_left: u32 },
    /// Wrong answer with attempts exhausted; the correct word is revealed
    /// and only an explicit [`QuizSession::advance`] moves on.
    Revealed,
}

/// One quiz run over a shuffled word list: type the Italian word for the
/// displayed English meaning, two attempts per word.
#[derive(Debug, Clone)]
pub struct QuizSession {
    words: Vec<Word>,
    current: usize,
    input: String,
    attempts: u32,
    show_answer: bool,
    feedback: Option<Feedback>,
    score: u32,
    streak: u32,
    completed: bool,
}

impl QuizSession {
    /// Starts a session over a uniformly shuffled copy of `words`.
    /// Returns `None` for an empty list; the quiz cannot start without
    /// words and callers present an explicit empty state instead.
    pub fn new<R: Rng>(mut words: Vec<Word>, rng: &mut R) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        words.shuffle(rng);
        Some(Self {
            words,
            current: 0,
            input: String::new(),
            attempts: 0,
            show_answer: false,
            feedback: None,
            score: 0,
            streak: 0,
            completed: false,
        })
    }

    pub fn current_word(&self) -> Option<&Word> {
        if self.completed {
            return None;
        }
        self.words.get(self.current)
    }

    /// The English meaning shown as the current challenge.
    pub fn prompt(&self) -> Option<&str> {
        self.current_word().map(|word| word.english_word.as_str())
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Checks the current input against the expected Italian word.
    ///
    /// Both sides are normalized (trimmed, lowercased) and compared for
    /// exact equality. Returns `None` when no submission is possible:
    /// blank input, answer already revealed, correct answer pending
    /// advance, or session completed.
    pub fn submit(&mut self) -> Option<Feedback> {
        if self.completed || self.show_answer || matches!(self.feedback, Some(Feedback::Correct)) {
            return None;
        }
        if self.input.trim().is_empty() {
            return None;
        }
        let expected = self.words[self.current].italian_word.to_lowercase();
        let guess = self.input.trim().to_lowercase();

        let feedback = if guess == expected {
            self.score += 1;
            self.streak += 1;
            Feedback::Correct
        } else {
            self.streak = 0;
            if self.attempts < MAX_ATTEMPTS - 1 {
                self.attempts += 1;
                self.input.clear();
                Feedback::Incorrect {
                    attempts_left: MAX_ATTEMPTS - self.attempts,
                }
            } else {
                self.show_answer = true;
                Feedback::Revealed
            }
        };

        self.feedback = Some(feedback);
        Some(feedback)
    }

    /// Moves to the next word (or completes the session on the last one),
    /// resetting input, attempt count, answer reveal and feedback. Only
    /// valid after a correct answer or a reveal.
    pub fn advance(&mut self) {
        if self.completed {
            return;
        }
        if !self.show_answer && !matches!(self.feedback, Some(Feedback::Correct)) {
            return;
        }

        if self.current + 1 < self.words.len() {
            self.current += 1;
            self.input.clear();
            self.attempts = 0;
            self.show_answer = false;
            self.feedback = None;
        } else {
            self.completed = true;
            self.feedback = None;
        }
    }

    /// Clears transient feedback (the UI does this on a short timer after
    /// an incorrect guess).
    pub fn clear_feedback(&mut self) {
        if !matches!(self.feedback, Some(Feedback::Correct)) && !self.show_answer {
            self.feedback = None;
        }
    }

    /// Writes a masked hint into the input: the first half of the target
    /// word (rounded up), with the remaining positions replaced by `_`.
    /// Returns `None` once the answer is revealed or the session is done.
    pub fn hint(&mut self) -> Option<&str> {
        if self.completed || self.show_answer {
            return None;
        }
        let word = self.words.get(self.current)?;
        self.input = masked_hint(&word.italian_word);
        Some(&self.input)
    }

    /// The correct word, available only after attempts are exhausted.
    pub fn revealed_answer(&self) -> Option<&str> {
        if !self.show_answer {
            return None;
        }
        self.current_word().map(|word| word.italian_word.as_str())
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// 1-based position of the current word, for progress display.
    pub fn position(&self) -> usize {
        self.current + 1
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    /// Share of words answered correctly so far, rounded.
    pub fn accuracy_percent(&self) -> u32 {
        ((self.score as f64 / self.position() as f64) * 100.0).round() as u32
    }

    /// Final score as a rounded percentage of the whole list.
    pub fn percentage(&self) -> u32 {
        ((self.score as f64 / self.total() as f64) * 100.0).round() as u32
    }
}

fn masked_hint(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let keep = (chars.len() + 1) / 2;
    let mut hint: String = chars[..keep].iter().collect();
    hint.extend(std::iter::repeat(HINT_PLACEHOLDER).take(chars.len() - keep));
    hint
}

/// Connection phase of the quiz view.
#[derive(Debug)]
pub enum QuizPhase {
    Loading,
    /// Network fetch failed; the UI shows an error view with a retry action.
    Failed { message: String },
    /// The store holds no words yet; the quiz cannot start.
    Empty,
    Active(QuizSession),
}

/// Async shell around [`QuizSession`]: fetches the word list, maps the
/// result into a phase, and drives restart and the in-quiz add-word flow.
pub struct QuizClient {
    api: ApiClient,
    guard: FetchGuard,
    phase: QuizPhase,
}

impl QuizClient {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            guard: FetchGuard::new(),
            phase: QuizPhase::Loading,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        match &mut self.phase {
            QuizPhase::Active(session) => Some(session),
            _ => None,
        }
    }

    /// Fetches the word list and enters the matching phase. Also serves as
    /// retry (from the error view) and restart (from the completion view):
    /// each call refetches and reshuffles.
    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let result = self.api.fetch_words().await;
        self.resolve_load(ticket, result);
    }

    /// Marks a fetch as started and returns its ticket.
    pub fn begin_load(&mut self) -> FetchTicket {
        self.phase = QuizPhase::Loading;
        self.guard.begin()
    }

    /// Applies a fetch result, unless a newer load superseded the ticket.
    pub fn resolve_load(&mut self, ticket: FetchTicket, result: Result<Vec<Word>, ClientError>) {
        self.resolve_load_with_rng(ticket, result, &mut rand::thread_rng());
    }

    pub fn resolve_load_with_rng<R: Rng>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Word>, ClientError>,
        rng: &mut R,
    ) {
        if !self.guard.is_current(ticket) {
            return;
        }

        self.phase = match result {
            Err(err) => QuizPhase::Failed {
                message: err.to_string(),
            },
            Ok(words) => match QuizSession::new(words, rng) {
                None => QuizPhase::Empty,
                Some(session) => QuizPhase::Active(session),
            },
        };
    }

    /// Submits the add-word form. On success the form is cleared and the
    /// word list fully refreshed (which reshuffles); on failure the form
    /// keeps its values and shows the error inline. Returns whether the
    /// word was created.
    pub async fn submit_new_word(&mut self, form: &mut AddWordForm) -> bool {
        let Some((italian, english)) = form.begin_submit() else {
            return false;
        };

        match self.api.create_word(&italian, &english).await {
            Ok(_) => {
                form.complete();
                self.load().await;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "word creation failed");
                form.fail(err.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn sample_words() -> Vec<Word> {
        vec![
            Word::new(1, "ciao", "hello"),
            Word::new(2, "gatto", "cat"),
            Word::new(3, "cane", "dog"),
        ]
    }

    fn start(words: Vec<Word>) -> QuizSession {
        let mut rng = StdRng::seed_from_u64(7);
        QuizSession::new(words, &mut rng).expect("non-empty word list")
    }

    fn answer_current_correctly(session: &mut QuizSession) {
        let expected = session.current_word().unwrap().italian_word.clone();
        session.set_input(expected);
        assert_eq!(session.submit(), Some(Feedback::Correct));
        session.advance();
    }

    #[test]
    fn test_empty_word_list_cannot_start() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(QuizSession::new(Vec::new(), &mut rng).is_none());
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let session = start(sample_words());
        let mut ids: Vec<i64> = session.words.iter().map(|w| w.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(session.total(), 3);
    }

    #[test]
    fn test_same_seed_shuffles_identically() {
        let a = start(sample_words());
        let b = start(sample_words());
        let order_a: Vec<i64> = a.words.iter().map(|w| w.id).collect();
        let order_b: Vec<i64> = b.words.iter().map(|w| w.id).collect();
        assert_eq!(order_a, order_b);
    }

    #[test]
    fn test_all_first_attempt_correct_scores_full() {
        let mut session = start(sample_words());

        for _ in 0..3 {
            answer_current_correctly(&mut session);
        }

        assert!(session.is_completed());
        assert_eq!(session.score(), 3);
        assert_eq!(session.streak(), 3);
        assert_eq!(session.percentage(), 100);
    }

    #[test]
    fn test_correct_answer_is_case_and_whitespace_insensitive() {
        let mut session = start(sample_words());
        let expected = session.current_word().unwrap().italian_word.clone();

        session.set_input(format!("  {}  ", expected.to_uppercase()));
        assert_eq!(session.submit(), Some(Feedback::Correct));
    }

    #[test]
    fn test_first_wrong_answer_clears_input_and_keeps_word() {
        let mut session = start(sample_words());
        let position = session.position();

        session.set_input("sbagliato");
        assert_eq!(session.submit(), Some(Feedback::Incorrect { attempts_left: 1 }));
        assert_eq!(session.input(), "");
        assert_eq!(session.position(), position);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.attempts(), 1);

        session.clear_feedback();
        assert_eq!(session.feedback(), None);
    }

    #[test]
    fn test_two_wrong_answers_reveal_and_block_third_guess() {
        let mut session = start(sample_words());
        let expected = session.current_word().unwrap().italian_word.clone();

        session.set_input("sbagliato");
        assert_eq!(session.submit(), Some(Feedback::Incorrect { attempts_left: 1 }));
        session.set_input("sbagliato");
        assert_eq!(session.submit(), Some(Feedback::Revealed));

        assert_eq!(session.revealed_answer(), Some(expected.as_str()));

        // A third guess is not accepted, not even the correct word.
        session.set_input(expected);
        assert_eq!(session.submit(), None);
        assert_eq!(session.score(), 0);

        // Only the explicit advance moves on.
        session.advance();
        assert_eq!(session.position(), 2);
        assert!(!session.is_completed());
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.revealed_answer(), None);
    }

    #[test]
    fn test_second_attempt_correct_still_scores() {
        let mut session = start(sample_words());
        let expected = session.current_word().unwrap().italian_word.clone();

        session.set_input("sbagliato");
        session.submit();
        session.set_input(expected);
        assert_eq!(session.submit(), Some(Feedback::Correct));
        assert_eq!(session.score(), 1);
        assert_eq!(session.streak(), 1);
    }

    #[test]
    fn test_blank_input_is_not_a_submission() {
        let mut session = start(sample_words());
        session.set_input("   ");
        assert_eq!(session.submit(), None);
        assert_eq!(session.attempts(), 0);
    }

    #[test]
    fn test_advance_requires_resolution() {
        let mut session = start(sample_words());
        session.advance();
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_completion_percentage_rounds() {
        let mut session = start(sample_words());

        answer_current_correctly(&mut session);
        for _ in 0..2 {
            session.set_input("sbagliato");
            session.submit();
            session.set_input("sbagliato");
            session.submit();
            session.advance();
        }

        assert!(session.is_completed());
        assert_eq!(session.score(), 1);
        assert_eq!(session.percentage(), 33);
    }

    #[test]
    fn test_accuracy_tracks_position() {
        let mut session = start(sample_words());
        answer_current_correctly(&mut session);
        // One of two words seen so far.
        session.set_input("sbagliato");
        session.submit();
        assert_eq!(session.accuracy_percent(), 50);
    }

    #[test]
    fn test_hint_masks_second_half() {
        let mut session = start(vec![Word::new(1, "ciao", "hello")]);
        assert_eq!(session.hint(), Some("ci__"));
        assert_eq!(session.input(), "ci__");
    }

    #[test]
    fn test_hint_counts_characters_not_bytes() {
        let mut session = start(vec![Word::new(1, "perché", "why")]);
        assert_eq!(session.hint(), Some("per___"));
    }

    #[test]
    fn test_hint_unavailable_after_reveal() {
        let mut session = start(vec![Word::new(1, "ciao", "hello")]);
        session.set_input("sbagliato");
        session.submit();
        session.set_input("sbagliato");
        session.submit();
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_client_resolve_maps_results_to_phases() {
        let mut client = QuizClient::new(ApiClient::default());
        let mut rng = StdRng::seed_from_u64(1);

        let ticket = client.begin_load();
        client.resolve_load_with_rng(ticket, Ok(Vec::new()), &mut rng);
        assert!(matches!(client.phase(), QuizPhase::Empty));

        let ticket = client.begin_load();
        client.resolve_load_with_rng(ticket, Ok(sample_words()), &mut rng);
        assert!(matches!(client.phase(), QuizPhase::Active(_)));
        assert!(client.session_mut().is_some());
    }

    #[test]
    fn test_client_keeps_error_message_for_retry_view() {
        let mut client = QuizClient::new(ApiClient::default());
        let mut rng = StdRng::seed_from_u64(1);

        let ticket = client.begin_load();
        client.resolve_load_with_rng(
            ticket,
            Err(ClientError::Api {
                status: 500,
                message: "Unexpected error".to_string(),
            }),
            &mut rng,
        );

        match client.phase() {
            QuizPhase::Failed { message } => assert_eq!(message, "Unexpected error"),
            other => panic!("expected failed phase, got {other:?}"),
        }
    }

    #[test]
    fn test_client_drops_stale_fetch_result() {
        let mut client = QuizClient::new(ApiClient::default());
        let mut rng = StdRng::seed_from_u64(1);

        let stale = client.begin_load();
        let _current = client.begin_load();

        client.resolve_load_with_rng(stale, Ok(sample_words()), &mut rng);
        assert!(matches!(client.phase(), QuizPhase::Loading));
    }

    proptest! {
        #[test]
        fn prop_hint_keeps_length_and_prefix(word in "[a-zàèéìòù]{1,24}") {
            let hint = masked_hint(&word);
            let word_chars: Vec<char> = word.chars().collect();
            let hint_chars: Vec<char> = hint.chars().collect();
            let keep = (word_chars.len() + 1) / 2;

            prop_assert_eq!(hint_chars.len(), word_chars.len());
            prop_assert_eq!(&hint_chars[..keep], &word_chars[..keep]);
            prop_assert!(hint_chars[keep..].iter().all(|&c| c == HINT_PLACEHOLDER));
        }
    }
}
