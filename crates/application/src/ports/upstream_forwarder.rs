use async_trait::async_trait;

/// Relays a raw query to upstream resolvers.
#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Returns the first upstream reply verbatim, or `None` once every
    /// upstream has failed.
    async fn forward(&self, query: &[u8]) -> Option<Vec<u8>>;
}
