//! Client-side session logic for the Parole vocabulary trainer.
//!
//! The quiz, search and add-word flows are modelled as plain state objects
//! with pure transition functions, so every rule (attempt limit, hint
//! masking, scoring, search filtering) is unit-testable without a rendering
//! environment or a network. Network effects are confined to [`api`] and
//! the thin async shells ([`quiz::QuizClient`], [`search::SearchClient`]),
//! which apply fetch results through the same pure transitions.

pub mod api;
pub mod form;
pub mod loader;
pub mod quiz;
pub mod search;
pub mod types;

pub use api::{ApiClient, ClientError};
pub use form::AddWordForm;
pub use loader::{FetchGuard, FetchTicket};
pub use quiz::{Feedback, QuizClient, QuizPhase, QuizSession};
pub use search::{SearchClient, SearchMode, SearchOutcome, SearchResults, SearchSession};
pub use types::Word;
