use super::Repositories;
use regieleki_application::use_cases::HandleDnsQueryUseCase;
use regieleki_domain::Config;
use regieleki_infrastructure::dns::{DnsServer, UdpForwarder};
use regieleki_infrastructure::system::discover_upstreams;
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub server: Arc<DnsServer>,
    pub forwarder: Arc<UdpForwarder>,
}

impl DnsServices {
    pub async fn new(config: &Config, repos: &Repositories) -> anyhow::Result<Self> {
        let mut upstreams = config.dns.upstream_addrs()?;
        if upstreams.is_empty() {
            upstreams = discover_upstreams().await;
        } else {
            info!(upstreams = ?upstreams, "Using configured upstream resolvers");
        }

        let forwarder = Arc::new(UdpForwarder::new(upstreams, config.dns.forward_timeout()));
        let handler = Arc::new(HandleDnsQueryUseCase::new(
            repos.records.clone(),
            forwarder.clone(),
        ));
        let server = Arc::new(DnsServer::new(handler, config.dns.max_concurrent_queries));

        Ok(Self { server, forwarder })
    }
}
