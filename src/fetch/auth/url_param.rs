use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends an API key as a URL query parameter.
///
/// Google takes API keys as `key=<value>`. A key only identifies the caller;
/// it does not grant access to a private sheet, so this only reaches sheets
/// shared by link.
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub key: String,
}

impl<C> UrlParam<C> {
    pub fn google_api_key(inner: C, key: &str) -> Self {
        Self {
            inner,
            param_name: "key".to_string(),
            key: key.to_string(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.param_name, &self.key);
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fetch_bytes;
    use crate::fetch::test_support::FakeClient;

    #[tokio::test]
    async fn test_key_is_appended_to_query() {
        let fake = FakeClient::new(200, "");
        let client = UrlParam::google_api_key(fake.clone(), "k123");

        fetch_bytes(
            &client,
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv",
        )
        .await
        .unwrap();

        assert_eq!(
            fake.requested(),
            vec!["https://docs.google.com/spreadsheets/d/abc/export?format=csv&key=k123"]
        );
    }

    #[tokio::test]
    async fn test_key_is_escaped() {
        let fake = FakeClient::new(200, "");
        let client = UrlParam::google_api_key(fake.clone(), "a b&c");

        fetch_bytes(&client, "https://example.org/grades.csv").await.unwrap();

        assert_eq!(
            fake.requested(),
            vec!["https://example.org/grades.csv?key=a+b%26c"]
        );
    }
}
