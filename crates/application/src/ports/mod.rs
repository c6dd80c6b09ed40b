mod record_repository;
mod upstream_forwarder;

pub use record_repository::{RecordRepository, Resolution};
pub use upstream_forwarder::UpstreamForwarder;
