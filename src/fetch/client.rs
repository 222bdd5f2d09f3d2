use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared request. Wrappers stack on top of this to inject
/// credentials before the request reaches the network.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
