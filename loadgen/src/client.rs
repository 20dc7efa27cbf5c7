use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::CONTENT_LENGTH;
use hyper::{Request, StatusCode};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use load_test_util::collect::CollectBodyFuture;

/// Pooled HTTP/1 client. Each simulated user constructs its own so users
/// share no connections.
#[derive(Clone)]
pub struct HttpClient {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpClient {
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }

    /// Sends one request and collects the full response body. Transport
    /// failures surface as errors; HTTP-level failures come back as a status
    /// code for the caller to record.
    pub async fn send_recv(
        &mut self,
        request: Request<Full<Bytes>>,
    ) -> Result<(StatusCode, Vec<u8>)> {
        let resp = self
            .client
            .request(request)
            .await
            .context("failed to send request")?;
        let status = resp.status();
        let content_length: usize = resp
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|hv| hv.to_str().ok())
            .and_then(|hv| hv.parse().ok())
            .unwrap_or(1024);
        let body = CollectBodyFuture::with_size_hint(resp.into_body(), content_length).await?;
        Ok((status, body))
    }
}
