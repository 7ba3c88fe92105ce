use async_trait::async_trait;
use reqwest::Client;

use super::{ClientError, GenerateRequest, GenerateResponse, GenerationBackend};

/// Talks to the generation backend over HTTP
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_url(&self) -> String {
        format!("{}/generate", self.base_url)
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ClientError> {
        let url = self.generate_url();
        tracing::debug!(%url, content_type = %request.content_type, "Posting generation request");

        let response = self.client.post(&url).json(request).send().await?;

        // Failure responses carry their message in the JSON body, so read it whatever the status
        let status = response.status();
        let body = response.bytes().await?;
        let parsed: GenerateResponse = serde_json::from_slice(&body)
            .map_err(|source| ClientError::InvalidBody { status, source })?;

        tracing::debug!(%status, success = parsed.success, "Generation response received");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentType;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer exactly one HTTP request with a canned response; yields the raw request text
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];

            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);

                if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                    let content_length = headers
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&buf).to_string()
        });

        (format!("http://{addr}/api"), handle)
    }

    fn local_backend(base_url: &str) -> HttpBackend {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpBackend::with_client(client, base_url)
    }

    fn split_request(raw: &str) -> (&str, serde_json::Value) {
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        (head, serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:3001/api/");
        assert_eq!(backend.base_url(), "http://localhost:3001/api");
        assert_eq!(backend.generate_url(), "http://localhost:3001/api/generate");
    }

    #[tokio::test]
    async fn test_posts_json_body_to_generate() {
        let (base_url, server) =
            serve_once("HTTP/1.1 200 OK", r#"{"success":true,"content":"Ten ways to live green"}"#).await;

        let backend = local_backend(&base_url);
        let request = GenerateRequest::new("sustainable living", ContentType::Blog);
        let response = backend.generate(&request).await.unwrap();

        assert_eq!(response, GenerateResponse::ok("Ten ways to live green"));

        let raw = server.await.unwrap();
        let (head, body) = split_request(&raw);
        assert!(head.starts_with("POST /api/generate HTTP/1.1"));
        assert!(head.to_lowercase().contains("content-type: application/json"));
        assert_eq!(
            body,
            serde_json::json!({"prompt": "sustainable living", "type": "blog", "maxTokens": 1000})
        );
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_parsed() {
        let (base_url, server) =
            serve_once("HTTP/1.1 429 Too Many Requests", r#"{"success":false,"message":"rate limited"}"#).await;

        let backend = local_backend(&base_url);
        let response = backend
            .generate(&GenerateRequest::new("x", ContentType::Tweet))
            .await
            .unwrap();

        assert_eq!(response, GenerateResponse::failed(Some("rate limited")));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_body() {
        let (base_url, server) = serve_once("HTTP/1.1 502 Bad Gateway", "<html>bad gateway</html>").await;

        let backend = local_backend(&base_url);
        let err = backend
            .generate(&GenerateRequest::new("x", ContentType::Idea))
            .await
            .unwrap_err();

        match err {
            ClientError::InvalidBody { status, .. } => assert_eq!(status.as_u16(), 502),
            other => panic!("expected InvalidBody, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = local_backend(&format!("http://{addr}/api"));
        let err = backend
            .generate(&GenerateRequest::new("x", ContentType::Blog))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
    }
}
