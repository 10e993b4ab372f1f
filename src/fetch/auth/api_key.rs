use crate::fetch::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that injects a credential as an HTTP header.
///
/// Header name and value are validated when the wrapper is built, so
/// requests never fail on a malformed credential.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    value: HeaderValue,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("invalid header name '{header_name}'"))?;
        let mut value = HeaderValue::from_str(key).context("credential is not a valid header value")?;
        value.set_sensitive(true);
        Ok(Self {
            inner,
            header_name,
            value,
        })
    }

    /// Uses `Authorization: Bearer <token>`, the form Google expects for
    /// OAuth access tokens.
    pub fn bearer(inner: C, token: &str) -> Result<Self> {
        Self::new(inner, "Authorization", &format!("Bearer {token}"))
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.value.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;

    #[test]
    fn test_bearer_builds_authorization_header() {
        let client = ApiKey::bearer(BasicClient::new().unwrap(), "token123").unwrap();

        assert_eq!(client.header_name, "authorization");
        assert_eq!(client.value.to_str().unwrap(), "Bearer token123");
        assert!(client.value.is_sensitive());
    }

    #[test]
    fn test_invalid_header_name_is_rejected() {
        assert!(ApiKey::new(BasicClient::new().unwrap(), "bad header", "k").is_err());
    }

    #[test]
    fn test_invalid_header_value_is_rejected() {
        assert!(ApiKey::new(BasicClient::new().unwrap(), "X-Key", "line\nbreak").is_err());
    }
}
