use crate::api::GenerationBackend;
use crate::catalog::ContentType;
use crate::session::{Rejection, Session};

/// Runs the whole submit → request → complete cycle against a backend
pub struct GenerationClient<B> {
    backend: B,
    session: Session,
}

impl<B: GenerationBackend> GenerationClient<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Submit `prompt` from the prompt form (always a blog post)
    pub async fn submit_freeform(&mut self, prompt: &str) -> Result<(), Rejection> {
        self.session.prompt_text = prompt.to_string();
        let request = self.session.submit_freeform()?;
        let result = self.backend.generate(&request).await;
        self.session.complete(result);
        Ok(())
    }

    /// Submit `prompt` as `content_type`
    pub async fn submit_typed(&mut self, prompt: &str, content_type: ContentType) -> Result<(), Rejection> {
        self.session.prompt_text = prompt.to_string();
        let request = self.session.submit_typed(content_type)?;
        let result = self.backend.generate(&request).await;
        self.session.complete(result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientError, GenerateRequest, GenerateResponse};
    use crate::session::{CONNECTION_FAILED_MESSAGE, EMPTY_PROMPT_MESSAGE, GENERATION_FAILED_MESSAGE};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Replays canned replies and records every request it sees
    struct MockBackend {
        replies: Mutex<Vec<Result<GenerateResponse, ClientError>>>,
        requests: Mutex<Vec<GenerateRequest>>,
    }

    impl MockBackend {
        fn new(replies: Vec<Result<GenerateResponse, ClientError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<GenerateRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationBackend for MockBackend {
        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ClientError> {
            self.requests.lock().unwrap().push(request.clone());
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                Err(ClientError::Task("no reply queued".to_string()))
            } else {
                replies.remove(0)
            }
        }
    }

    #[tokio::test]
    async fn test_empty_prompt_never_reaches_backend() {
        let mut client = GenerationClient::new(MockBackend::new(vec![]));

        assert_eq!(client.submit_typed("   ", ContentType::Blog).await, Err(Rejection::EmptyPrompt));
        assert_eq!(client.submit_freeform("").await, Err(Rejection::EmptyPrompt));

        assert!(client.backend().requests().is_empty());
        assert_eq!(client.session().error_message(), Some(EMPTY_PROMPT_MESSAGE));
    }

    #[tokio::test]
    async fn test_blog_tile_success() {
        let backend = MockBackend::new(vec![Ok(GenerateResponse::ok("Ten ways to live green"))]);
        let mut client = GenerationClient::new(backend);

        client.submit_typed("sustainable living", ContentType::Blog).await.unwrap();

        assert_eq!(
            client.backend().requests(),
            vec![GenerateRequest::new("sustainable living", ContentType::Blog)]
        );
        let session = client.session();
        assert_eq!(session.generated_text(), Some("Ten ways to live green"));
        assert_eq!(session.error_message(), None);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_failure_with_and_without_message() {
        let backend = MockBackend::new(vec![
            Ok(GenerateResponse::ok("first draft")),
            Ok(GenerateResponse::failed(Some("rate limited"))),
            Ok(GenerateResponse::failed(None)),
        ]);
        let mut client = GenerationClient::new(backend);

        client.submit_typed("x", ContentType::Tweet).await.unwrap();
        client.submit_typed("x", ContentType::Tweet).await.unwrap();
        assert_eq!(client.session().error_message(), Some("rate limited"));
        assert_eq!(client.session().generated_text(), Some("first draft"));

        client.submit_typed("x", ContentType::Tweet).await.unwrap();
        assert_eq!(client.session().error_message(), Some(GENERATION_FAILED_MESSAGE));
        assert_eq!(client.session().generated_text(), Some("first draft"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mut client = GenerationClient::new(MockBackend::new(vec![]));

        client.submit_freeform("hello").await.unwrap();

        assert_eq!(client.session().error_message(), Some(CONNECTION_FAILED_MESSAGE));
        assert!(!client.session().is_loading());
        assert_eq!(client.backend().requests()[0].content_type, ContentType::Blog);
    }
}
