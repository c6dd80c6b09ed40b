use super::interfaces::local_addresses;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::fs;
use tracing::{debug, info};

const RESOLV_CONF_PATHS: [&str; 2] = ["/etc/resolv.conf", "/run/systemd/resolve/resolv.conf"];

pub const FALLBACK_UPSTREAMS: [SocketAddr; 2] = [
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53),
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)), 53),
];

/// Finds upstream resolvers from the system resolver configuration.
///
/// The first file that yields a usable nameserver wins. Nameservers on this
/// host are skipped, since forwarding to them would loop back to us.
pub async fn discover_upstreams() -> Vec<SocketAddr> {
    let local = local_addresses();

    for path in RESOLV_CONF_PATHS {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                debug!(path, error = %e, "Skipping resolver configuration");
                continue;
            }
        };

        let servers = parse_nameservers(&content, &local);
        if !servers.is_empty() {
            info!(path, upstreams = ?servers, "Discovered upstream resolvers");
            return servers;
        }
    }

    info!(upstreams = ?FALLBACK_UPSTREAMS, "No usable nameserver found, using fallback upstreams");
    FALLBACK_UPSTREAMS.to_vec()
}

/// Extracts `nameserver` entries as `ip:53`, leaving out loopback addresses
/// and anything in `local`.
pub fn parse_nameservers(content: &str, local: &[IpAddr]) -> Vec<SocketAddr> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            if fields.next() != Some("nameserver") {
                return None;
            }
            // Zone suffixes (fe80::1%eth0) are not representable here.
            fields.next()?.parse::<IpAddr>().ok()
        })
        .filter(|ip| !ip.is_loopback() && !local.contains(ip))
        .map(|ip| SocketAddr::new(ip, 53))
        .collect()
}
