pub mod buffer_pool;
pub mod forwarding;
pub mod server;
pub mod transport;

pub use buffer_pool::{BufferPool, PoolStats, PooledBuffer};
pub use forwarding::UdpForwarder;
pub use server::DnsServer;
