#![allow(dead_code)]

use async_trait::async_trait;
use regieleki_application::ports::{RecordRepository, Resolution, UpstreamForwarder};
use regieleki_domain::{DomainError, Record, RecordType, QTYPE_ANY};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockRecordRepository {
    records: Arc<RwLock<Vec<Record>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_records(records: Vec<Record>) -> Self {
        let repo = Self::new();
        *repo.records.write().await = records;
        repo
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    fn check_write(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(DomainError::Persistence("disk full".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordRepository for MockRecordRepository {
    async fn list(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    async fn resolve(&self, domain: &str, qtype: u16) -> Resolution {
        let domain = domain.to_lowercase();
        let records = self.records.read().await;
        let all: Vec<Record> = records
            .iter()
            .filter(|r| r.domain == domain)
            .cloned()
            .collect();
        if all.is_empty() {
            return Resolution::not_ours();
        }
        if qtype == QTYPE_ANY {
            return Resolution::authoritative(all);
        }
        let matched: Vec<Record> = all
            .iter()
            .filter(|r| r.record_type.matches_qtype(qtype))
            .cloned()
            .collect();
        if matched.is_empty() {
            let cname = all
                .into_iter()
                .find(|r| r.record_type == RecordType::CNAME);
            return Resolution::authoritative(cname.into_iter().collect());
        }
        Resolution::authoritative(matched)
    }

    async fn add(
        &self,
        domain: &str,
        record_type: RecordType,
        value: &str,
    ) -> Result<Record, DomainError> {
        self.check_write()?;
        let mut records = self.records.write().await;
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = Record::new(id, domain, record_type, value);
        records.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: i64,
        domain: &str,
        record_type: RecordType,
        value: &str,
    ) -> Result<Record, DomainError> {
        self.check_write()?;
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::NotFound(id))?;
        *slot = Record::new(id, domain, record_type, value);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.check_write()?;
        let mut records = self.records.write().await;
        let idx = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(DomainError::NotFound(id))?;
        records.remove(idx);
        Ok(())
    }
}

/// Forwarder returning a canned reply (or nothing) and counting calls.
#[derive(Clone, Default)]
pub struct MockForwarder {
    reply: Option<Vec<u8>>,
    calls: Arc<AtomicUsize>,
}

impl MockForwarder {
    pub fn replying(reply: Vec<u8>) -> Self {
        Self {
            reply: Some(reply),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl UpstreamForwarder for MockForwarder {
    async fn forward(&self, _query: &[u8]) -> Option<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.reply.clone()
    }
}
