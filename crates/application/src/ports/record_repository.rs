use async_trait::async_trait;
use regieleki_domain::{DomainError, Record, RecordType};

/// Outcome of looking a question up in the local record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub records: Vec<Record>,
    /// The name is managed locally: answer from `records` (possibly with no
    /// answers) and never forward.
    pub authoritative: bool,
}

impl Resolution {
    pub fn not_ours() -> Self {
        Self::default()
    }

    pub fn authoritative(records: Vec<Record>) -> Self {
        Self {
            records,
            authoritative: true,
        }
    }
}

/// Owner of the locally managed records.
///
/// Callers are expected to have validated record fields; implementations
/// only normalise case and never reject a record for its content.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Snapshot of every record in store order.
    async fn list(&self) -> Vec<Record>;

    async fn resolve(&self, domain: &str, qtype: u16) -> Resolution;

    async fn add(
        &self,
        domain: &str,
        record_type: RecordType,
        value: &str,
    ) -> Result<Record, DomainError>;

    async fn update(
        &self,
        id: i64,
        domain: &str,
        record_type: RecordType,
        value: &str,
    ) -> Result<Record, DomainError>;

    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}
