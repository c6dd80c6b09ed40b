use crate::dns::buffer_pool::BufferPool;
use regieleki_application::use_cases::HandleDnsQueryUseCase;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::{watch, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 1000;

const WRITE_TIMEOUT: Duration = Duration::from_secs(2);
const SOCKET_BUFFER_SIZE: usize = 512 * 1024;

/// UDP listener dispatching each datagram to a [`HandleDnsQueryUseCase`].
///
/// Every accepted datagram is handled on its own task. At most
/// `max_concurrent` handlers run at once; datagrams arriving while the
/// limit is reached are dropped, never queued.
pub struct DnsServer {
    handler: Arc<HandleDnsQueryUseCase>,
    limiter: Arc<Semaphore>,
    max_concurrent: usize,
    buffers: BufferPool,
    ready_tx: watch::Sender<Option<SocketAddr>>,
    shutdown: CancellationToken,
}

impl DnsServer {
    pub fn new(handler: Arc<HandleDnsQueryUseCase>, max_concurrent: usize) -> Self {
        let (ready_tx, _) = watch::channel(None);
        Self {
            handler,
            limiter: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
            buffers: BufferPool::default(),
            ready_tx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Binds `addr` and serves until [`close`](Self::close) is called.
    ///
    /// Returns `Ok(())` after a close; bind failures are returned as is.
    pub async fn listen_and_serve(&self, addr: SocketAddr) -> io::Result<()> {
        let socket = Arc::new(bind_udp_socket(addr)?);
        let local_addr = socket.local_addr()?;
        self.ready_tx.send_replace(Some(local_addr));

        info!(
            address = %local_addr,
            max_concurrent = self.max_concurrent,
            "DNS server listening"
        );

        loop {
            let mut buf = self.buffers.acquire();

            let (len, peer) = tokio::select! {
                _ = self.shutdown.cancelled() => {
                    let stats = self.buffers.stats();
                    info!(
                        address = %local_addr,
                        buffers_created = stats.total_created,
                        buffers_reused = stats.total_reused,
                        "DNS server closed"
                    );
                    return Ok(());
                }
                result = socket.recv_from(buf.as_mut_slice()) => match result {
                    Ok(received) => received,
                    Err(e) => {
                        debug!(error = %e, "UDP recv error");
                        continue;
                    }
                },
            };

            let query = buf.as_slice()[..len].to_vec();
            drop(buf);

            let permit = match self.limiter.clone().try_acquire_owned() {
                Ok(permit) => permit,
                Err(_) => {
                    warn!(remote = %peer, "Too many queries in flight, dropping datagram");
                    continue;
                }
            };

            let handler = self.handler.clone();
            let socket = socket.clone();
            tokio::spawn(async move {
                let _permit = permit;
                let Some(response) = handler.execute(&query).await else {
                    return;
                };
                match tokio::time::timeout(WRITE_TIMEOUT, socket.send_to(&response, peer)).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => debug!(remote = %peer, error = %e, "Failed to send response"),
                    Err(_) => debug!(remote = %peer, "Timed out sending response"),
                }
            });
        }
    }

    /// Waits until the socket is bound and returns its local address, or
    /// `None` if the server is closed first.
    pub async fn ready(&self) -> Option<SocketAddr> {
        let mut rx = self.ready_tx.subscribe();
        tokio::select! {
            bound = rx.wait_for(Option::is_some) => bound.ok().and_then(|addr| *addr),
            _ = self.shutdown.cancelled() => None,
        }
    }

    /// Stops the accept loop. In-flight handlers run to completion.
    pub fn close(&self) {
        self.shutdown.cancel();
    }

    /// Closes the server and waits up to `grace` for in-flight handlers.
    /// Returns `false` if some were still running when the grace ran out.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.close();

        let all = u32::try_from(self.max_concurrent).unwrap_or(u32::MAX);
        match tokio::time::timeout(grace, self.limiter.acquire_many(all)).await {
            Ok(_) => true,
            Err(_) => {
                warn!(
                    in_flight = self.in_flight(),
                    "Shutdown grace period elapsed with queries in flight"
                );
                false
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.max_concurrent
            .saturating_sub(self.limiter.available_permits())
    }
}

fn bind_udp_socket(addr: SocketAddr) -> io::Result<UdpSocket> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_recv_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.set_send_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
