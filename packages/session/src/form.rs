/// State of the in-quiz add-word modal: two text fields, a submitting
/// flag and an inline error. Submission side effects live in
/// [`crate::quiz::QuizClient::submit_new_word`].
#[derive(Debug, Clone, Default)]
pub struct AddWordForm {
    italian: String,
    english: String,
    error: Option<String>,
    submitting: bool,
    open: bool,
}

impl AddWordForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the modal. Field values are kept; they are cleared only on a
    /// successful submit.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_italian(&mut self, value: impl Into<String>) {
        self.italian = value.into();
    }

    pub fn set_english(&mut self, value: impl Into<String>) {
        self.english = value.into();
    }

    pub fn italian(&self) -> &str {
        &self.italian
    }

    pub fn english(&self) -> &str {
        &self.english
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Both fields non-blank and no submission in flight.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.italian.trim().is_empty() && !self.english.trim().is_empty()
    }

    /// Starts a submission, returning the trimmed field values, or `None`
    /// when the form is not submittable.
    pub(crate) fn begin_submit(&mut self) -> Option<(String, String)> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some((
            self.italian.trim().to_string(),
            self.english.trim().to_string(),
        ))
    }

    /// Successful submit: clear the fields and close the modal.
    pub(crate) fn complete(&mut self) {
        self.italian.clear();
        self.english.clear();
        self.error = None;
        self.submitting = false;
        self.open = false;
    }

    /// Failed submit: keep the fields, surface the error inline.
    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_cannot_submit() {
        let mut form = AddWordForm::new();
        assert!(!form.can_submit());

        form.set_italian("ciao");
        form.set_english("   ");
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), None);
    }

    #[test]
    fn test_begin_submit_trims_values() {
        let mut form = AddWordForm::new();
        form.open();
        form.set_italian("  ciao ");
        form.set_english(" hello  ");

        let values = form.begin_submit().expect("submittable form");
        assert_eq!(values, ("ciao".to_string(), "hello".to_string()));
        assert!(form.is_submitting());

        // No double submission while one is in flight.
        assert_eq!(form.begin_submit(), None);
    }

    #[test]
    fn test_failure_keeps_fields_and_shows_error() {
        let mut form = AddWordForm::new();
        form.open();
        form.set_italian("ciao");
        form.set_english("hello");
        form.begin_submit().unwrap();

        form.fail("Unexpected error".to_string());
        assert_eq!(form.error(), Some("Unexpected error"));
        assert_eq!(form.italian(), "ciao");
        assert!(form.is_open());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_success_clears_and_closes() {
        let mut form = AddWordForm::new();
        form.open();
        form.set_italian("ciao");
        form.set_english("hello");
        form.begin_submit().unwrap();

        form.complete();
        assert_eq!(form.italian(), "");
        assert_eq!(form.english(), "");
        assert_eq!(form.error(), None);
        assert!(!form.is_open());
        assert!(!form.is_submitting());
    }
}
