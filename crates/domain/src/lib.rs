//! Regieleki Domain Layer
pub mod config;
pub mod dns_wire;
pub mod errors;
pub mod record;

pub use config::{CliOverrides, Config};
pub use dns_wire::WireError;
pub use errors::DomainError;
pub use record::{Record, RecordType, QTYPE_ANY};
