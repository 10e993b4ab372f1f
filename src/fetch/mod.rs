mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};

/// Fetches `url` through `client` and returns the body.
///
/// Non-success statuses are errors.
#[tracing::instrument(skip(client))]
pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid URL '{url}'"))?,
    );

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::HttpClient;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Answers every request with a fixed status and body and remembers the
    /// requested URLs.
    #[derive(Clone)]
    pub struct FakeClient {
        status: u16,
        body: String,
        pub urls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeClient {
        pub fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                urls: Arc::default(),
            }
        }

        pub fn requested(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClient for FakeClient {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            self.urls.lock().unwrap().push(req.url().to_string());
            let resp = http::Response::builder()
                .status(self.status)
                .body(self.body.clone())
                .unwrap();
            Ok(reqwest::Response::from(resp))
        }
    }
}
