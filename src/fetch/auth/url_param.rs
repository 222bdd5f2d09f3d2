use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use std::fmt;

/// An [`HttpClient`] wrapper that appends an API key as a URL query parameter.
///
/// `param_name` is the query parameter name and `key` is its value. The key
/// never shows up in `Debug` output.
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub key: String,
}

impl<C> UrlParam<C> {
    /// NASA's convention: `?api_key=<key>`.
    pub fn api_key(inner: C, key: impl Into<String>) -> Self {
        Self {
            inner,
            param_name: "api_key".to_string(),
            key: key.into(),
        }
    }
}

impl<C> fmt::Debug for UrlParam<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlParam")
            .field("param_name", &self.param_name)
            .field("key", &"<redacted>")
            .finish_non_exhaustive()
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

    struct Unused;

    #[test]
    fn test_debug_redacts_key() {
        let client = UrlParam::api_key(Unused, "s3cr3t-key");
        let printed = format!("{client:?}");

        assert!(printed.contains("api_key"));
        assert!(!printed.contains("s3cr3t-key"));
    }
}
