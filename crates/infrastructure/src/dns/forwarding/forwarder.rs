use crate::dns::transport::UdpTransport;
use async_trait::async_trait;
use regieleki_application::ports::UpstreamForwarder;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_FORWARD_TIMEOUT: Duration = Duration::from_secs(2);

/// Relays raw queries to a fixed, ordered list of upstream resolvers.
///
/// Upstreams are tried one after another; the first datagram received back
/// is returned untouched. Replies are not checked against the query.
pub struct UdpForwarder {
    upstreams: Vec<UdpTransport>,
    timeout: Duration,
}

impl UdpForwarder {
    pub fn new(upstreams: Vec<SocketAddr>, timeout: Duration) -> Self {
        Self {
            upstreams: upstreams.into_iter().map(UdpTransport::new).collect(),
            timeout,
        }
    }

    pub fn upstreams(&self) -> Vec<SocketAddr> {
        self.upstreams.iter().map(|t| t.server_addr()).collect()
    }
}

#[async_trait]
impl UpstreamForwarder for UdpForwarder {
    async fn forward(&self, query: &[u8]) -> Option<Vec<u8>> {
        for upstream in &self.upstreams {
            match upstream.exchange(query, self.timeout).await {
                Ok(response) => return Some(response),
                Err(e) => {
                    debug!(upstream = %upstream.server_addr(), error = %e, "Upstream failed");
                }
            }
        }
        None
    }
}
