use crate::di::DnsServices;
use anyhow::Context;
use std::net::SocketAddr;
use tracing::info;

pub async fn start_dns_server(services: &DnsServices, bind_addr: SocketAddr) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        upstreams = ?services.forwarder.upstreams(),
        "Starting DNS server"
    );

    services
        .server
        .listen_and_serve(bind_addr)
        .await
        .with_context(|| format!("DNS server on {} failed", bind_addr))
}
