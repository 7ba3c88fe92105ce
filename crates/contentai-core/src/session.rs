//! UI-agnostic session state
//!
//! A [`Session`] holds everything a front end shows for one generation session:
//! the prompt being edited, which content type was asked for, whether a request
//! is in flight, and the last error or generated text. Front ends call one of the
//! two submit operations, dispatch the returned request however suits them, and
//! hand the result back through [`Session::complete`].

use crate::api::{ClientError, GenerateRequest, GenerateResponse};
use crate::catalog::ContentType;

pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt first";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate content";
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Failed to connect to the server. Make sure the backend is running.";

/// Why a submit did not produce a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Prompt was empty or whitespace; the error message has been set
    EmptyPrompt,
    /// A request is already in flight; nothing changed
    Busy,
}

/// How a dispatched request resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Backend answered `success: true`
    Generated(String),
    /// Backend answered `success: false`, maybe with a message
    Failed(Option<String>),
    /// No usable answer came back
    Unreachable,
}

impl From<Result<GenerateResponse, ClientError>> for Outcome {
    fn from(result: Result<GenerateResponse, ClientError>) -> Self {
        match result {
            Ok(response) if response.success => {
                Outcome::Generated(response.content.unwrap_or_default())
            }
            Ok(response) => Outcome::Failed(response.message),
            Err(e) => {
                tracing::error!(error = %e, "Generation error");
                Outcome::Unreachable
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Text the user is editing; front ends mutate this directly
    pub prompt_text: String,
    selected_type: Option<ContentType>,
    is_loading: bool,
    error_message: Option<String>,
    generated_text: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile chosen for the latest request; `None` for freeform submissions
    pub fn selected_type(&self) -> Option<ContentType> {
        self.selected_type
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn generated_text(&self) -> Option<&str> {
        self.generated_text.as_deref()
    }

    /// Label for the generated-content badge
    pub fn badge_title(&self) -> &'static str {
        self.selected_type.map(|t| t.title()).unwrap_or("Content")
    }

    /// Form submission. Always asks for a blog post.
    pub fn submit_freeform(&mut self) -> Result<GenerateRequest, Rejection> {
        self.begin(None)
    }

    /// Tile activation for `content_type`
    pub fn submit_typed(&mut self, content_type: ContentType) -> Result<GenerateRequest, Rejection> {
        self.begin(Some(content_type))
    }

    fn begin(&mut self, tile: Option<ContentType>) -> Result<GenerateRequest, Rejection> {
        if self.is_loading {
            tracing::debug!("Ignoring submit while a request is in flight");
            return Err(Rejection::Busy);
        }

        if self.prompt_text.trim().is_empty() {
            self.error_message = Some(EMPTY_PROMPT_MESSAGE.to_string());
            return Err(Rejection::EmptyPrompt);
        }

        self.is_loading = true;
        self.error_message = None;
        self.selected_type = tile;

        let content_type = tile.unwrap_or(ContentType::Blog);
        tracing::info!(content_type = %content_type, "Dispatching generation request");
        Ok(GenerateRequest::new(self.prompt_text.clone(), content_type))
    }

    /// Apply the result of the in-flight request and clear the loading flag
    pub fn complete(&mut self, outcome: impl Into<Outcome>) {
        match outcome.into() {
            Outcome::Generated(content) => {
                self.generated_text = Some(content);
                self.error_message = None;
            }
            Outcome::Failed(message) => {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| GENERATION_FAILED_MESSAGE.to_string());
                tracing::warn!(%message, "Backend reported a failed generation");
                self.error_message = Some(message);
            }
            Outcome::Unreachable => {
                self.error_message = Some(CONNECTION_FAILED_MESSAGE.to_string());
            }
        }
        self.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session_with(prompt: &str) -> Session {
        Session {
            prompt_text: prompt.to_string(),
            ..Session::default()
        }
    }

    #[test]
    fn test_empty_prompt_is_rejected_locally() {
        for prompt in ["", " ", "\n\t  "] {
            let mut session = session_with(prompt);
            assert_eq!(session.submit_typed(ContentType::Tweet), Err(Rejection::EmptyPrompt));
            assert_eq!(session.error_message(), Some(EMPTY_PROMPT_MESSAGE));
            assert!(!session.is_loading());

            let mut session = session_with(prompt);
            assert_eq!(session.submit_freeform(), Err(Rejection::EmptyPrompt));
            assert_eq!(session.error_message(), Some(EMPTY_PROMPT_MESSAGE));
        }
    }

    #[test]
    fn test_submit_sets_loading_and_clears_error() {
        let mut session = session_with("sustainable living");
        session.error_message = Some("old".to_string());

        let request = session.submit_typed(ContentType::Blog).unwrap();

        assert_eq!(request, GenerateRequest::new("sustainable living", ContentType::Blog));
        assert!(session.is_loading());
        assert_eq!(session.error_message(), None);
        assert_eq!(session.selected_type(), Some(ContentType::Blog));
    }

    #[test]
    fn test_prompt_is_sent_untrimmed() {
        let mut session = session_with("  a tweet about mornings \n");
        let request = session.submit_typed(ContentType::Tweet).unwrap();
        assert_eq!(request.prompt, "  a tweet about mornings \n");
        assert_eq!(request.max_tokens, 1000);
    }

    #[test]
    fn test_freeform_asks_for_blog_without_selecting_a_tile() {
        let mut session = session_with("hello");
        session.selected_type = Some(ContentType::Email);

        let request = session.submit_freeform().unwrap();

        assert_eq!(request.content_type, ContentType::Blog);
        assert_eq!(session.selected_type(), None);
        assert_eq!(session.badge_title(), "Content");
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let mut session = session_with("first");
        session.submit_typed(ContentType::Idea).unwrap();

        session.prompt_text.clear();
        assert_eq!(session.submit_typed(ContentType::Tag), Err(Rejection::Busy));
        assert_eq!(session.submit_freeform(), Err(Rejection::Busy));

        // Busy wins over the empty-prompt check and leaves everything alone
        assert_eq!(session.error_message(), None);
        assert_eq!(session.selected_type(), Some(ContentType::Idea));
        assert!(session.is_loading());
    }

    #[test]
    fn test_success_replaces_content_and_clears_error() {
        let mut session = session_with("p");
        session.submit_typed(ContentType::Blog).unwrap();
        session.complete(Outcome::Generated("Ten tips".to_string()));

        assert_eq!(session.generated_text(), Some("Ten tips"));
        assert_eq!(session.error_message(), None);
        assert!(!session.is_loading());
        assert_eq!(session.badge_title(), "Blog Post");
    }

    #[test]
    fn test_failure_keeps_previous_content() {
        let mut session = session_with("p");
        session.submit_typed(ContentType::Blog).unwrap();
        session.complete(Outcome::Generated("kept".to_string()));

        session.submit_typed(ContentType::Tweet).unwrap();
        session.complete(Outcome::Failed(Some("rate limited".to_string())));

        assert_eq!(session.error_message(), Some("rate limited"));
        assert_eq!(session.generated_text(), Some("kept"));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_failure_without_message_uses_fallback() {
        let mut session = session_with("p");
        session.submit_typed(ContentType::Email).unwrap();
        session.complete(Outcome::Failed(None));
        assert_eq!(session.error_message(), Some(GENERATION_FAILED_MESSAGE));

        session.submit_typed(ContentType::Email).unwrap();
        session.complete(Outcome::Failed(Some(String::new())));
        assert_eq!(session.error_message(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[test]
    fn test_unreachable_sets_connection_message() {
        let mut session = session_with("p");
        session.submit_typed(ContentType::Comment).unwrap();
        session.complete(Outcome::Unreachable);

        assert_eq!(session.error_message(), Some(CONNECTION_FAILED_MESSAGE));
        assert_eq!(session.generated_text(), None);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_outcome_from_backend_results() {
        let ok: Result<GenerateResponse, ClientError> = Ok(GenerateResponse::ok("text"));
        assert_eq!(Outcome::from(ok), Outcome::Generated("text".to_string()));

        let no_content: Result<GenerateResponse, ClientError> = Ok(GenerateResponse {
            success: true,
            content: None,
            message: None,
        });
        assert_eq!(Outcome::from(no_content), Outcome::Generated(String::new()));

        let failed: Result<GenerateResponse, ClientError> =
            Ok(GenerateResponse::failed(Some("nope")));
        assert_eq!(Outcome::from(failed), Outcome::Failed(Some("nope".to_string())));

        let broken: Result<GenerateResponse, ClientError> =
            Err(ClientError::Task("panicked".to_string()));
        assert_eq!(Outcome::from(broken), Outcome::Unreachable);
    }
}
