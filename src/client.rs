//! HTTP fetch client — timed GET requests shared by downloads and aggregation

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;

/// Lazily yielded body chunks from a streaming GET
///
/// Single-pass and non-restartable. Chunk boundaries are a transport detail;
/// callers should only rely on the concatenation of chunks.
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Connection-reusing HTTP client with a fixed per-request timeout
///
/// One instance serves a whole run: whole-document fetches and streamed
/// downloads share its connection pool. Redirects are followed. Transport
/// errors, timeouts, and non-2xx statuses all surface as [`Error::Network`];
/// nothing is retried here.
#[derive(Clone, Debug)]
pub struct FetchClient {
    inner: reqwest::Client,
}

impl FetchClient {
    /// Build a client from HTTP settings
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(config.request_timeout);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent);
        }
        Ok(Self {
            inner: builder.build()?,
        })
    }

    /// GET a document and return the full body decoded as text
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.inner.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// GET a resource and return its body as a lazy chunk stream
    ///
    /// The status line and headers are awaited here, so a non-2xx response
    /// fails before the caller commits to a destination path. Body bytes
    /// arrive incrementally as the stream is polled, letting callers write
    /// to disk without buffering the whole payload.
    pub async fn fetch_stream(&self, url: &str) -> Result<ByteStream> {
        let response = self.inner.get(url).send().await?.error_for_status()?;
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(Error::from))
            .boxed())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> FetchClient {
        FetchClient::new(&HttpConfig::default()).expect("client must build")
    }

    #[tokio::test]
    async fn fetch_text_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("udp://tracker.example:80"))
            .mount(&server)
            .await;

        let body = test_client()
            .fetch_text(&format!("{}/list.txt", server.uri()))
            .await
            .expect("fetch should succeed");

        assert_eq!(body, "udp://tracker.example:80");
    }

    #[tokio::test]
    async fn fetch_text_errors_on_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = test_client()
            .fetch_text(&format!("{}/missing.txt", server.uri()))
            .await
            .expect_err("404 must be an error, not an empty success");

        match err {
            Error::Network(e) => assert!(e.is_status(), "expected a status error, got: {e}"),
            other => panic!("expected Error::Network, got: {other}"),
        }
    }

    #[tokio::test]
    async fn fetch_text_follows_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/moved"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/target", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/target"))
            .respond_with(ResponseTemplate::new(200).set_body_string("after redirect"))
            .mount(&server)
            .await;

        let body = test_client()
            .fetch_text(&format!("{}/moved", server.uri()))
            .await
            .expect("redirect should be followed to the final document");

        assert_eq!(body, "after redirect");
    }

    #[tokio::test]
    async fn fetch_stream_yields_entire_body() {
        // Large enough to arrive in more than one chunk
        let payload = vec![0xAB_u8; 256 * 1024];
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blob.bin"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
            .mount(&server)
            .await;

        let mut stream = test_client()
            .fetch_stream(&format!("{}/blob.bin", server.uri()))
            .await
            .expect("stream should open");

        let mut received = Vec::new();
        while let Some(chunk) = stream.next().await {
            received.extend_from_slice(&chunk.expect("chunk should arrive"));
        }

        assert_eq!(
            received.len(),
            payload.len(),
            "concatenated chunks must equal the full payload"
        );
        assert_eq!(received, payload);
    }

    #[tokio::test]
    async fn fetch_stream_errors_before_yielding_on_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken.bin"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = test_client()
            .fetch_stream(&format!("{}/broken.bin", server.uri()))
            .await;

        assert!(
            result.is_err(),
            "non-2xx must fail at fetch_stream, before any chunk is produced"
        );
    }

    #[tokio::test]
    async fn request_timeout_is_enforced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow.txt"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = FetchClient::new(&HttpConfig {
            request_timeout: Duration::from_millis(100),
            user_agent: None,
        })
        .expect("client must build");

        let err = client
            .fetch_text(&format!("{}/slow.txt", server.uri()))
            .await
            .expect_err("request exceeding the timeout must fail");

        match err {
            Error::Network(e) => assert!(e.is_timeout(), "expected a timeout error, got: {e}"),
            other => panic!("expected Error::Network, got: {other}"),
        }
    }
}
